use async_trait::async_trait;
use reqwest::Client;

use crate::client::{CatalogClient, ClientError, ClientResult};
use crate::domain::product::NewProductInput;

/// `reqwest`-backed client posting products to the catalog service.
#[derive(Clone)]
pub struct HttpCatalogClient {
    http: Client, // reqwest::Client is cheap to clone
    endpoint: String,
}

impl HttpCatalogClient {
    /// Create a client targeting the products `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn create_product(&self, input: &NewProductInput) -> ClientResult<()> {
        log::debug!("Posting product `{}` to {}", input.name, self.endpoint);

        let response = self.http.post(&self.endpoint).json(input).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
