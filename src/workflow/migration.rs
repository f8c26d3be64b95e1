use tracing::{info, warn};

use crate::config::{AppConfig, NotifyTarget, UnresolvedPolicy};
use crate::context::AppContext;
use crate::domain::index::RepositoryIndex;
use crate::domain::notification::NotificationMessage;
use crate::domain::service::Service;
use crate::domain::ticket::TicketRequest;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryOutcome {
    Ticketed {
        repository: String,
        service_id: String,
        ticket_key: String,
        notified: bool,
    },
    Skipped {
        repository: String,
    },
}

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub outcomes: Vec<RepositoryOutcome>,
}

impl MigrationReport {
    pub fn ticket_keys(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                RepositoryOutcome::Ticketed { ticket_key, .. } => Some(ticket_key.as_str()),
                RepositoryOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RepositoryOutcome::Skipped { .. }))
            .count()
    }

    pub fn notification_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| {
                matches!(outcome, RepositoryOutcome::Ticketed { notified: false, .. })
            })
            .count()
    }
}

/// Files one migration ticket per repository and announces it in chat.
///
/// Repositories are processed strictly in order. A failed ticket aborts the
/// run and leaves earlier tickets and notifications in place; a failed
/// notification is logged and the run moves on.
pub async fn migrate_repositories(
    ctx: &AppContext,
    index: &RepositoryIndex,
    repositories: &[String],
) -> AppResult<MigrationReport> {
    let placeholder = Service::default();
    let mut report = MigrationReport::default();

    for repository in repositories {
        let service = match index.resolve(repository) {
            Some(service) => service,
            None => match ctx.config.workflow.unresolved {
                UnresolvedPolicy::PassThrough => {
                    warn!(repository = %repository, "repository not in catalog; filing ticket without a service");
                    &placeholder
                }
                UnresolvedPolicy::Skip => {
                    warn!(repository = %repository, "repository not in catalog; skipping");
                    report.outcomes.push(RepositoryOutcome::Skipped {
                        repository: repository.clone(),
                    });
                    continue;
                }
                UnresolvedPolicy::Fail => {
                    return Err(AppError::UnresolvedRepository(repository.clone()));
                }
            },
        };

        let request = TicketRequest::migration(
            &service.service_id,
            repository,
            &ctx.config.jira.issue_type,
            &ctx.config.jira.project_key,
        );
        let ticket = ctx.issue_tracker.create_ticket(request).await?;
        info!(ticket = %ticket.key, summary = %ticket.request.summary, repository = %repository, "created ticket");

        let message = NotificationMessage::migration_request(
            notification_channel(&ctx.config, service),
            &service.service_id,
            &ticket.url,
        );
        let notified = match ctx.notifier.post_message(&message).await {
            Ok(delivery) => {
                info!(channel = %delivery.channel, timestamp = %delivery.timestamp, "notification sent");
                true
            }
            Err(err) => {
                warn!(ticket = %ticket.key, channel = %message.channel, error = %err, "notification failed");
                false
            }
        };

        report.outcomes.push(RepositoryOutcome::Ticketed {
            repository: repository.clone(),
            service_id: service.service_id.clone(),
            ticket_key: ticket.key,
            notified,
        });
    }

    Ok(report)
}

fn notification_channel<'a>(config: &'a AppConfig, service: &'a Service) -> &'a str {
    match config.workflow.notify {
        NotifyTarget::Default => config.slack.default_channel.as_str(),
        NotifyTarget::Service => service
            .channel_id()
            .unwrap_or(config.slack.default_channel.as_str()),
    }
}
