//! HTTP trigger for the Functions custom handler.
//!
//! The host forwards `/api/WebHookAutoscaler?action=Up|Down` here unchanged.
//! Every failure is answered with 400 and the error text.

use crate::core::autoscaler::Autoscaler;
use crate::core::{ScaleAction, ThroughputClient};
use crate::utils::error::AutoscaleError;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const WEBHOOK_ROUTE: &str = "/api/WebHookAutoscaler";

#[derive(Debug)]
pub enum WebhookError {
    MissingAction,
    Autoscale(AutoscaleError),
}

impl From<AutoscaleError> for WebhookError {
    fn from(err: AutoscaleError) -> Self {
        WebhookError::Autoscale(err)
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let message = match self {
            WebhookError::MissingAction => {
                "Please pass an action on the query string: Up or Down".to_string()
            }
            WebhookError::Autoscale(err) => {
                tracing::warn!(
                    category = ?err.category(),
                    severity = ?err.severity(),
                    "autoscale request failed: {}",
                    err
                );
                err.to_string()
            }
        };

        (StatusCode::BAD_REQUEST, message).into_response()
    }
}

pub fn create_app<C: ThroughputClient + 'static>(autoscaler: Arc<Autoscaler<C>>) -> Router {
    Router::new()
        .route(WEBHOOK_ROUTE, get(scale::<C>).post(scale::<C>))
        .with_state(autoscaler)
        .layer(TraceLayer::new_for_http())
}

/// Collects every `action` value; repeated keys join with `,` and never match.
pub fn action_param(raw_query: Option<&str>) -> Option<String> {
    let values: Vec<String> = url::form_urlencoded::parse(raw_query.unwrap_or("").as_bytes())
        .filter(|(key, _)| key == "action")
        .map(|(_, value)| value.into_owned())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

async fn scale<C: ThroughputClient + 'static>(
    State(autoscaler): State<Arc<Autoscaler<C>>>,
    RawQuery(raw_query): RawQuery,
) -> Result<String, WebhookError> {
    let requested = action_param(raw_query.as_deref());
    tracing::info!("HTTP trigger processed a request (action={:?})", requested);

    let requested = requested
        .filter(|a| !a.is_empty())
        .ok_or(WebhookError::MissingAction)?;
    let action: ScaleAction = requested
        .parse()
        .map_err(|_| WebhookError::MissingAction)?;

    let outcome = autoscaler.run(action).await?;
    Ok(outcome.message(&requested))
}
