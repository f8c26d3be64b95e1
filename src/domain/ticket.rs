#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    pub summary: String,
    pub issue_type: String,
    pub project_key: String,
    pub description: String,
}

impl TicketRequest {
    pub fn migration(
        service_id: &str,
        repository: &str,
        issue_type: &str,
        project_key: &str,
    ) -> Self {
        Self {
            summary: format!("Migration: {service_id}"),
            issue_type: issue_type.to_string(),
            project_key: project_key.to_string(),
            description: format!("Code Repository: {repository}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub key: String,
    pub url: String,
    pub request: TicketRequest,
}

pub fn browse_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
}
