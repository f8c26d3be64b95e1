use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::JiraConfig;
use crate::domain::ticket::{Ticket, TicketRequest, browse_url};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    base_url: String,
    user: String,
    token: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.baseurl.clone(),
            user: config.user.clone(),
            token: config.token.clone(),
        }
    }

    fn auth_header(user: &str, token: &str) -> String {
        let credentials = format!("{user}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn issue_endpoint(base_url: &str) -> String {
        format!("{}/rest/api/3/issue", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn create_ticket(&self, request: TicketRequest) -> AppResult<Ticket> {
        let project_key = request.project_key.trim();
        if project_key.is_empty() {
            return Err(AppError::TicketCreation(
                "project key must not be empty".to_string(),
            ));
        }

        let request_body = JiraCreateIssueRequest::new(
            project_key,
            &request.issue_type,
            &request.summary,
            &request.description,
        );

        debug!(summary = %request.summary, project = %project_key, "creating Jira issue");
        let response = self
            .http
            .post(Self::issue_endpoint(&self.base_url))
            .header(AUTHORIZATION, Self::auth_header(&self.user, &self.token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::TicketCreation(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::TicketCreation(format!(
                "Jira responded with {status}: {body}"
            )));
        }

        let payload: JiraCreateIssueResponse = response.json().await.map_err(|err| {
            AppError::TicketCreation(format!("failed to parse Jira response: {err}"))
        })?;

        let url = browse_url(&self.base_url, &payload.key);
        Ok(Ticket {
            key: payload.key,
            url,
            request,
        })
    }
}

#[derive(Serialize)]
struct JiraCreateIssueRequest {
    fields: JiraCreateIssueFields,
}

impl JiraCreateIssueRequest {
    fn new(project_key: &str, issue_type: &str, summary: &str, description: &str) -> Self {
        Self {
            fields: JiraCreateIssueFields {
                project: JiraProject {
                    key: project_key.to_string(),
                },
                summary: summary.to_string(),
                description: JiraDescription::from_text(description),
                issuetype: JiraIssueType {
                    name: issue_type.to_string(),
                },
            },
        }
    }
}

#[derive(Serialize)]
struct JiraCreateIssueFields {
    project: JiraProject,
    summary: String,
    description: JiraDescription,
    issuetype: JiraIssueType,
}

#[derive(Serialize)]
struct JiraProject {
    key: String,
}

#[derive(Serialize)]
struct JiraIssueType {
    name: String,
}

/// Atlassian document format body; the v3 API rejects plain strings.
#[derive(Serialize)]
struct JiraDescription {
    #[serde(rename = "type")]
    doc_type: &'static str,
    version: u8,
    content: Vec<JiraDocNode>,
}

impl JiraDescription {
    fn from_text(description: &str) -> Self {
        let cleaned = description.replace('\r', "");
        let content = cleaned
            .split("\n\n")
            .map(|section| section.trim())
            .filter(|section| !section.is_empty())
            .map(|section| JiraDocNode::paragraph(section.replace('\n', " ")))
            .collect();

        Self {
            doc_type: "doc",
            version: 1,
            content,
        }
    }
}

#[derive(Serialize)]
struct JiraDocNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<JiraDocText>,
}

impl JiraDocNode {
    fn paragraph(text: String) -> Self {
        Self {
            node_type: "paragraph",
            content: vec![JiraDocText::text(text)],
        }
    }
}

#[derive(Serialize)]
struct JiraDocText {
    #[serde(rename = "type")]
    text_type: &'static str,
    text: String,
}

impl JiraDocText {
    fn text(text: String) -> Self {
        Self {
            text_type: "text",
            text,
        }
    }
}

#[derive(Deserialize)]
struct JiraCreateIssueResponse {
    key: String,
}
