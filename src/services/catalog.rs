use async_trait::async_trait;

use crate::domain::service::Service;
use crate::error::AppResult;

/// Source of the full list of known services, in catalog order.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_services(&self) -> AppResult<Vec<Service>>;
}
