use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{CatalogSource, IssueTrackerService, NotificationService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub catalog: Arc<dyn CatalogSource>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub notifier: Arc<dyn NotificationService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn CatalogSource>,
        issue_tracker: Arc<dyn IssueTrackerService>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            config,
            catalog,
            issue_tracker,
            notifier,
        }
    }
}
