//! In-memory stand-ins for the external services.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::notification::{Delivery, NotificationMessage};
use crate::domain::service::{Service, SlackChannel};
use crate::domain::ticket::{Ticket, TicketRequest, browse_url};
use crate::error::{AppError, AppResult};
use crate::services::{CatalogSource, IssueTrackerService, NotificationService};

pub const BASE_URL: &str = "https://example.atlassian.net/";
pub const DEFAULT_CHANNEL: &str = "C0DEFAULT";

pub fn test_config() -> AppConfig {
    AppConfig::from_yaml(&format!(
        "jira:\n  baseurl: {BASE_URL}\n  projectKey: MIG\nslack:\n  defaultChannel: {DEFAULT_CHANNEL}\n"
    ))
    .unwrap()
}

pub fn service(id: &str, repositories: &[&str]) -> Service {
    Service {
        service_id: id.to_string(),
        repository_urls: repositories.iter().map(|r| r.to_string()).collect(),
        ..Service::default()
    }
}

pub fn service_with_channel(id: &str, repositories: &[&str], channel: &str) -> Service {
    Service {
        slack_general_channel: SlackChannel {
            channel_id: channel.to_string(),
            channel_name: id.to_string(),
        },
        ..service(id, repositories)
    }
}

#[derive(Clone, Default)]
pub struct FakeCatalog {
    pub services: Vec<Service>,
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn load_services(&self) -> AppResult<Vec<Service>> {
        Ok(self.services.clone())
    }
}

/// Issues sequential `MIG-n` keys; optionally fails the nth call (1-based).
#[derive(Clone, Default)]
pub struct FakeIssueTracker {
    pub requests: Arc<Mutex<Vec<TicketRequest>>>,
    pub fail_on_call: Option<usize>,
}

impl FakeIssueTracker {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<TicketRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTrackerService for FakeIssueTracker {
    async fn create_ticket(&self, request: TicketRequest) -> AppResult<Ticket> {
        let mut requests = self.requests.lock().unwrap();
        if self.fail_on_call == Some(requests.len() + 1) {
            return Err(AppError::TicketCreation("Jira responded with 500".to_string()));
        }
        requests.push(request.clone());
        let key = format!("MIG-{}", requests.len());
        Ok(Ticket {
            url: browse_url(BASE_URL, &key),
            key,
            request,
        })
    }
}

#[derive(Clone, Default)]
pub struct FakeNotifier {
    pub messages: Arc<Mutex<Vec<NotificationMessage>>>,
    pub failing_channel: Option<String>,
}

impl FakeNotifier {
    pub fn failing_for(channel: &str) -> Self {
        Self {
            failing_channel: Some(channel.to_string()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<NotificationMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationService for FakeNotifier {
    async fn post_message(&self, message: &NotificationMessage) -> AppResult<Delivery> {
        if self.failing_channel.as_deref() == Some(message.channel.as_str()) {
            return Err(AppError::Notification("channel_not_found".to_string()));
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(Delivery {
            channel: message.channel.clone(),
            timestamp: "1700000000.000100".to_string(),
        })
    }
}

pub fn context(
    config: AppConfig,
    catalog: FakeCatalog,
    tracker: &FakeIssueTracker,
    notifier: &FakeNotifier,
) -> AppContext {
    AppContext::new(
        config,
        Arc::new(catalog),
        Arc::new(tracker.clone()),
        Arc::new(notifier.clone()),
    )
}
