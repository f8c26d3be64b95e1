pub mod catalog;
pub mod jira;
pub mod repository_list;
pub mod slack;
