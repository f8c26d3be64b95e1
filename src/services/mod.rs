pub mod catalog;
pub mod issue_tracker;
pub mod notifier;

pub use catalog::CatalogSource;
pub use issue_tracker::IssueTrackerService;
pub use notifier::NotificationService;
