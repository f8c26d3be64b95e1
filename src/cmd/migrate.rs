use std::path::PathBuf;

use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::index::RepositoryIndex;
use crate::error::AppResult;
use crate::infra::repository_list::read_repository_list;
use crate::workflow::migration::{MigrationReport, migrate_repositories};

#[derive(Debug, Clone)]
pub struct MigrateCommandArgs {
    pub file: PathBuf,
}

pub async fn run(ctx: &AppContext, args: MigrateCommandArgs) -> AppResult<MigrationReport> {
    let services = ctx.catalog.load_services().await?;
    let index = RepositoryIndex::build(&services);
    info!(
        services = services.len(),
        repositories = index.len(),
        "loaded service catalog"
    );
    if index.is_empty() {
        warn!("service catalog lists no repositories; nothing will resolve");
    }

    let repositories = read_repository_list(&args.file)?;
    info!(
        count = repositories.len(),
        file = %args.file.display(),
        "read repository list"
    );

    migrate_repositories(ctx, &index, &repositories).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::testing::{
        DEFAULT_CHANNEL, FakeCatalog, FakeIssueTracker, FakeNotifier, context, service,
        test_config,
    };

    #[tokio::test]
    async fn runs_catalog_through_to_notifications() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("repos.csv");
        std::fs::write(&file, "repoA,ignored\n").unwrap();

        let tracker = FakeIssueTracker::default();
        let notifier = FakeNotifier::default();
        let catalog = FakeCatalog {
            services: vec![service("svc1", &["repoA"])],
        };
        let ctx = context(test_config(), catalog, &tracker, &notifier);

        let report = run(&ctx, MigrateCommandArgs { file }).await.unwrap();

        let created = tracker.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].summary, "Migration: svc1");
        assert_eq!(created[0].description, "Code Repository: repoA");
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].channel, DEFAULT_CHANNEL);
        assert!(sent[0].text.contains("MIG-1"));
        assert_eq!(report.ticket_keys(), ["MIG-1"]);
    }

    #[tokio::test]
    async fn unreadable_input_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = FakeIssueTracker::default();
        let notifier = FakeNotifier::default();
        let ctx = context(test_config(), FakeCatalog::default(), &tracker, &notifier);

        let result = run(
            &ctx,
            MigrateCommandArgs {
                file: dir.path().join("missing.csv"),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::InputUnreadable(_))));
        assert!(tracker.created().is_empty());
    }
}
