use async_trait::async_trait;
use mockall::mock;

use super::{CatalogClient, ClientResult};
use crate::domain::product::NewProductInput;

mock! {
    pub CatalogClient {}

    #[async_trait]
    impl CatalogClient for CatalogClient {
        async fn create_product(&self, input: &NewProductInput) -> ClientResult<()>;
    }
}
