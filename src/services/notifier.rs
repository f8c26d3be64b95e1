use async_trait::async_trait;

use crate::domain::notification::{Delivery, NotificationMessage};
use crate::error::AppResult;

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn post_message(&self, message: &NotificationMessage) -> AppResult<Delivery>;
}
