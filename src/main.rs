mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
#[cfg(test)]
mod testing;
mod workflow;

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cmd::migrate::{self, MigrateCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::catalog::FileCatalog;
use crate::infra::jira::JiraClient;
use crate::infra::slack::SlackClient;
use crate::workflow::migration::RepositoryOutcome;

#[derive(Parser)]
#[command(
    name = "imp",
    author,
    version,
    about = "File migration tickets for the services owning a list of repositories"
)]
struct Cli {
    /// CSV file listing repositories; only the first column is read.
    #[arg(short, long, value_name = "PATH")]
    file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    if let Err(err) = run(cli).await {
        error!(error = %err, "run aborted");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Accepts the single-dash `-file` spelling alongside clap's `--file`.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-file") => OsString::from("--file"),
            Some(value) if value.starts_with("-file=") => OsString::from(format!("-{value}")),
            _ => arg,
        })
        .collect()
}

async fn run(cli: Cli) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd)?;

    let catalog = Arc::new(FileCatalog::new(cwd.join(&config.catalog.path)));
    let issue_tracker = Arc::new(JiraClient::new(&config.jira));
    let notifier = Arc::new(SlackClient::new(&config.slack));

    let context = AppContext::new(config, catalog, issue_tracker, notifier);

    let report = migrate::run(&context, MigrateCommandArgs { file: cli.file }).await?;

    info!(
        tickets = report.ticket_keys().len(),
        skipped = report.skipped(),
        notification_failures = report.notification_failures(),
        "migration run complete"
    );
    for outcome in &report.outcomes {
        match outcome {
            RepositoryOutcome::Ticketed {
                repository,
                service_id,
                ticket_key,
                notified,
            } => {
                let note = if *notified { "" } else { " (not notified)" };
                println!("{ticket_key}\t{service_id}\t{repository}{note}");
            }
            RepositoryOutcome::Skipped { repository } => println!("-\t-\t{repository} (skipped)"),
        }
    }
    println!(
        "Created {} ticket(s); skipped {} repository(ies); {} notification(s) failed.",
        report.ticket_keys().len(),
        report.skipped(),
        report.notification_failures()
    );

    Ok(())
}
