use crate::adapters::auth::{rfc1123_now, MasterKey};
use crate::core::{ConfigProvider, Offer, ThroughputClient};
use crate::utils::error::{AutoscaleError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

pub const API_VERSION: &str = "2018-12-31";

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRef {
    pub id: String,
    #[serde(rename = "_rid")]
    pub rid: String,
    #[serde(rename = "_self")]
    pub self_link: String,
}

#[derive(Debug, Deserialize)]
struct OfferFeed {
    #[serde(rename = "Offers", default)]
    offers: Vec<serde_json::Value>,
}

#[derive(Debug)]
pub struct CosmosClient {
    client: Client,
    endpoint: String,
    key: MasterKey,
    database: String,
    collection: String,
}

impl CosmosClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint_url().trim_end_matches('/').to_string(),
            key: MasterKey::from_base64(config.authorization_key())?,
            database: config.database_name().to_string(),
            collection: config.collection_name().to_string(),
        })
    }

    pub fn collection_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.collection)
    }

    pub async fn read_collection(&self) -> Result<CollectionRef> {
        let link = self.collection_link();
        let body = self
            .send(Method::GET, &link, "colls", &link, |req| req)
            .await?;

        let collection: CollectionRef = serde_json::from_value(body)?;
        tracing::debug!(
            "Collection {} resolved to {} ({})",
            collection.id,
            collection.self_link,
            collection.rid
        );
        Ok(collection)
    }

    /// Looks up the single offer whose `resource` is `self_link`.
    pub async fn find_offer(&self, self_link: &str) -> Result<Offer> {
        let query = serde_json::json!({
            "query": "SELECT * FROM root WHERE root.resource = @link",
            "parameters": [{ "name": "@link", "value": self_link }]
        });

        let body = self
            .send(Method::POST, "offers", "offers", "", |req| {
                req.header("x-ms-documentdb-isquery", "True")
                    .header("Content-Type", "application/query+json")
                    .body(query.to_string())
            })
            .await?;

        let feed: OfferFeed = serde_json::from_value(body)?;
        let mut offers = feed.offers.into_iter();

        match (offers.next(), offers.next()) {
            (Some(offer), None) => Offer::from_json(offer),
            (None, _) => Err(AutoscaleError::OfferNotFound {
                resource: self_link.to_string(),
            }),
            (Some(_), Some(_)) => Err(AutoscaleError::CosmosError {
                status: 200,
                message: format!("More than one offer matches resource {}", self_link),
            }),
        }
    }

    pub async fn replace_offer(&self, offer: &Offer, throughput: u32) -> Result<Offer> {
        let rid = offer.rid().ok_or_else(|| AutoscaleError::ProcessingError {
            message: "Offer has no _rid".to_string(),
        })?;
        let updated = offer.with_throughput(throughput)?;
        let payload = serde_json::to_vec(updated.as_json())?;

        let body = self
            .send(Method::PUT, &format!("offers/{}", rid), "offers", rid, |req| {
                req.header("Content-Type", "application/json").body(payload)
            })
            .await?;

        Offer::from_json(body)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        resource_type: &str,
        resource_link: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<serde_json::Value> {
        let date = rfc1123_now();
        let token = self
            .key
            .token(method.as_str(), resource_type, resource_link, &date)?;
        let url = format!("{}/{}", self.endpoint, path);

        tracing::debug!("Cosmos DB request: {} {}", method, url);

        let request = self
            .client
            .request(method, &url)
            .header("authorization", token)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION)
            .header("Accept", "application/json");
        let response = build(request).send().await?;

        let status = response.status();
        tracing::debug!("Cosmos DB response status: {}", status);

        if !status.is_success() {
            let text = response.text().await?;
            return Err(AutoscaleError::CosmosError {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        Ok(response.json().await?)
    }
}

/// 取出服務回傳的 `message`，拿不到就用原始 body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ThroughputClient for CosmosClient {
    async fn read_offer(&self) -> Result<Offer> {
        let collection = self.read_collection().await?;
        self.find_offer(&collection.self_link).await
    }

    async fn replace_throughput(&self, offer: &Offer, throughput: u32) -> Result<Offer> {
        self.replace_offer(offer, throughput).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_service_message() {
        let body = r#"{"code":"NotFound","message":"Entity with the specified id does not exist in the system."}"#;
        assert_eq!(
            error_message(body),
            "Entity with the specified id does not exist in the system."
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
