use async_trait::async_trait;

use crate::domain::ticket::{Ticket, TicketRequest};
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn create_ticket(&self, request: TicketRequest) -> AppResult<Ticket>;
}
