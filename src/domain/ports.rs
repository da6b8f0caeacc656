use crate::domain::model::{Offer, ThroughputBounds};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn endpoint_url(&self) -> &str;
    fn authorization_key(&self) -> &str;
    fn database_name(&self) -> &str;
    fn collection_name(&self) -> &str;
    fn throughput_bounds(&self) -> ThroughputBounds;
    fn request_timeout_seconds(&self) -> u64;
}

/// Reads and rewrites the provisioned throughput of one container.
#[async_trait]
pub trait ThroughputClient: Send + Sync {
    async fn read_offer(&self) -> Result<Offer>;
    async fn replace_throughput(&self, offer: &Offer, throughput: u32) -> Result<Offer>;
}
