use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};

use crate::config::SlackConfig;
use crate::domain::notification::{Delivery, NotificationMessage};
use crate::error::{AppError, AppResult};
use crate::services::NotificationService;

pub struct SlackClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SlackClient {
    pub fn new(config: &SlackConfig) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        }
    }

    fn post_message_endpoint(api_url: &str) -> String {
        format!("{}/chat.postMessage", api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl NotificationService for SlackClient {
    async fn post_message(&self, message: &NotificationMessage) -> AppResult<Delivery> {
        if message.channel.trim().is_empty() {
            return Err(AppError::Notification(
                "channel must not be empty".to_string(),
            ));
        }

        let response = self
            .http
            .post(Self::post_message_endpoint(&self.api_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(&PostMessageRequest {
                channel: &message.channel,
                text: &message.text,
            })
            .send()
            .await
            .map_err(|err| AppError::Notification(format!("failed to call Slack: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Notification(format!(
                "Slack responded with {status}: {body}"
            )));
        }

        // Slack reports API failures with a 200 and `ok: false`.
        let payload: PostMessageResponse = response.json().await.map_err(|err| {
            AppError::Notification(format!("failed to parse Slack response: {err}"))
        })?;

        if !payload.ok {
            let reason = payload.error.unwrap_or_else(|| "unknown_error".to_string());
            return Err(AppError::Notification(format!(
                "Slack rejected message to {}: {reason}",
                message.channel
            )));
        }

        Ok(Delivery {
            channel: payload.channel.unwrap_or_else(|| message.channel.clone()),
            timestamp: payload.ts.unwrap_or_default(),
        })
    }
}

#[derive(Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn client_for(api_url: &str) -> SlackClient {
        SlackClient::new(&SlackConfig {
            token: "xoxb-test".to_string(),
            default_channel: "C0DEFAULT".to_string(),
            api_url: api_url.to_string(),
        })
    }

    fn message() -> NotificationMessage {
        NotificationMessage::migration_request(
            "C0DEFAULT",
            "svc1",
            "https://example.atlassian.net/browse/MIG-1",
        )
    }

    #[tokio::test]
    async fn posts_message_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat.postMessage")
            .match_header("authorization", "Bearer xoxb-test")
            .match_body(Matcher::Json(json!({
                "channel": "C0DEFAULT",
                "text": "Migration request for: svc1\nJira ticket: https://example.atlassian.net/browse/MIG-1"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "channel": "C0DEFAULT", "ts": "1700000000.000100"}"#)
            .expect(1)
            .create_async()
            .await;

        let delivery = client_for(&server.url()).post_message(&message()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(delivery.channel, "C0DEFAULT");
        assert_eq!(delivery.timestamp, "1700000000.000100");
    }

    #[tokio::test]
    async fn not_ok_response_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat.postMessage")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error": "channel_not_found"}"#)
            .create_async()
            .await;

        let err = client_for(&server.url())
            .post_message(&message())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Notification(_)));
        assert!(err.to_string().contains("channel_not_found"));
    }

    #[tokio::test]
    async fn server_error_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat.postMessage")
            .with_status(503)
            .create_async()
            .await;

        let result = client_for(&server.url()).post_message(&message()).await;
        assert!(matches!(result, Err(AppError::Notification(_))));
    }
}
