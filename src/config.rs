use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{AppError, AppResult};

const CONFIG_ENV_VAR: &str = "IMP_CONFIG";
const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];
const DEFAULT_ISSUE_TYPE: &str = "Task";
const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
const DEFAULT_CATALOG_PATH: &str = "services.json";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub jira: JiraConfig,
    pub slack: SlackConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraConfig {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub baseurl: String,
    #[serde(default, alias = "projectkey")]
    pub project_key: String,
    #[serde(default = "default_issue_type", alias = "issuetype")]
    pub issue_type: String,
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .field("baseurl", &self.baseurl)
            .field("project_key", &self.project_key)
            .field("issue_type", &self.issue_type)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default, alias = "defaultchannel")]
    pub default_channel: String,
    #[serde(default = "default_slack_api_url", alias = "apiurl")]
    pub api_url: String,
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("token", &"[REDACTED]")
            .field("default_channel", &self.default_channel)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
    #[serde(default)]
    pub notify: NotifyTarget,
}

/// What to do with a repository that no catalog service owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// File the ticket against an empty service, as earlier releases did.
    #[default]
    PassThrough,
    Skip,
    Fail,
}

/// Which channel receives the notification for a created ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyTarget {
    #[default]
    Default,
    /// The service's general channel, or the default channel when it has none.
    Service,
}

fn default_issue_type() -> String {
    DEFAULT_ISSUE_TYPE.to_string()
}

fn default_slack_api_url() -> String {
    DEFAULT_SLACK_API_URL.to_string()
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

impl AppConfig {
    /// Loads the configuration named by `IMP_CONFIG`, or the first of
    /// `config.yaml`/`config.yml` found in `workspace_root`.
    pub fn load(workspace_root: &Path) -> AppResult<Self> {
        Self::load_from(&config_file_path(workspace_root)?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AppError::Configuration(format!("failed to read {}: {err}", path.display()))
        })?;
        let config = Self::from_yaml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> AppResult<Self> {
        serde_yaml::from_str(contents)
            .map_err(|err| AppError::Configuration(format!("invalid config file: {err}")))
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.jira.baseurl.trim().is_empty() {
            return Err(AppError::Configuration(
                "jira.baseurl is not set".to_string(),
            ));
        }
        if self.jira.project_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "jira.projectKey is not set".to_string(),
            ));
        }
        if self.slack.default_channel.trim().is_empty() {
            return Err(AppError::Configuration(
                "slack.defaultChannel is not set".to_string(),
            ));
        }

        if self.jira.user.is_empty() {
            warn!("jira.user is not set; ticket creation will fail");
        }
        if self.jira.token.is_empty() {
            warn!("jira.token is not set; ticket creation will fail");
        }
        if self.slack.token.is_empty() {
            warn!("slack.token is not set; notifications will fail");
        }
        Ok(())
    }
}

pub fn config_file_path(workspace_root: &Path) -> AppResult<PathBuf> {
    resolve_config_path(env::var_os(CONFIG_ENV_VAR).map(PathBuf::from), workspace_root)
}

/// An explicit path wins; otherwise the first config file present in
/// `workspace_root`.
pub fn resolve_config_path(
    explicit: Option<PathBuf>,
    workspace_root: &Path,
) -> AppResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    CONFIG_FILE_NAMES
        .iter()
        .map(|name| workspace_root.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "no config.yaml found in {}",
                workspace_root.display()
            ))
        })
}
