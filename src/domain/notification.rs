#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub channel: String,
    pub text: String,
}

impl NotificationMessage {
    pub fn migration_request(channel: &str, service_id: &str, ticket_url: &str) -> Self {
        Self {
            channel: channel.to_string(),
            text: format!("Migration request for: {service_id}\nJira ticket: {ticket_url}"),
        }
    }
}

/// Confirmation returned by the chat service for a posted message.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub channel: String,
    pub timestamp: String,
}
