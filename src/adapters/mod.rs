// Adapters layer: concrete implementations for external systems (Cosmos DB REST, HTTP trigger).

pub mod auth;
pub mod cosmos;

#[cfg(feature = "function")]
pub mod webhook;
