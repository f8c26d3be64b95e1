use serde::Deserialize;

/// A deployable unit from the service catalog.
///
/// Every field defaults to empty, so `Service::default()` doubles as the
/// placeholder for repositories the catalog does not know about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub service_id: String,
    pub repository_urls: Vec<String>,
    pub issue_tracker_url: String,
    pub slack_general_channel: SlackChannel,
    pub team: Team,
}

impl Service {
    pub fn channel_id(&self) -> Option<&str> {
        let channel = self.slack_general_channel.channel_id.trim();
        (!channel.is_empty()).then_some(channel)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlackChannel {
    pub channel_id: String,
    pub channel_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    pub team_id: String,
    pub team_members: Vec<TeamMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub email: String,
    pub slack_display_name: String,
}
