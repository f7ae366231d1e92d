use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::NewProductInput;

pub mod http;

#[cfg(test)]
pub mod mock;

pub use http::HttpCatalogClient;

/// Result type returned by catalog service calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Reasons a call to the catalog service can fail.
///
/// The variants exist for server logs only; users are shown a single
/// generic message whatever the cause.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connection, TLS...).
    #[error("catalog service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status code.
    #[error("catalog service answered with status {status}")]
    Status { status: u16 },
}

/// Remote catalog that stores created products.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Send exactly one creation request for `input`.
    async fn create_product(&self, input: &NewProductInput) -> ClientResult<()>;
}
