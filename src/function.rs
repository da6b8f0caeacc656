use anyhow::Context;
use cosmos_autoscale::adapters::webhook::{create_app, WEBHOOK_ROUTE};
use cosmos_autoscale::core::ConfigProvider;
use cosmos_autoscale::utils::{logger, validation::Validate};
use cosmos_autoscale::{AutoscaleSettings, Autoscaler, CosmosClient};
use std::sync::Arc;
use tokio::signal;

const DEFAULT_PORT: &str = "3000";

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for SIGINT: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_function_logger();

    // 設定在啟動時讀一次，之後每個 request 共用
    let settings = AutoscaleSettings::from_env().context("loading app settings")?;
    settings.validate().context("validating app settings")?;

    let client = CosmosClient::new(&settings).context("creating Cosmos DB client")?;
    let autoscaler = Arc::new(Autoscaler::new(client, settings.throughput_bounds()));
    let app = create_app(autoscaler);

    // Functions host 透過這個環境變數告訴 custom handler 要聽哪個 port
    let port = std::env::var("FUNCTIONS_CUSTOMHANDLER_PORT")
        .unwrap_or_else(|_| DEFAULT_PORT.to_string());
    let addr = format!("0.0.0.0:{port}");
    tracing::info!(%addr, route = WEBHOOK_ROUTE, "starting custom handler");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("custom handler stopped");
    Ok(())
}
