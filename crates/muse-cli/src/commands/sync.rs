use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use muse_core::config::MuseConfig;
use muse_core::remote::HttpRemoteSource;
use muse_core::services::{SyncOutcome, SyncService};
use tokio::sync::Mutex;

use crate::commands::common::{format_change_report_lines, open_book};
use crate::config_file::load_effective_config;
use crate::error::CliError;

pub struct SyncOptions {
    pub watch: bool,
    pub interval_secs: Option<u64>,
    pub push: bool,
}

pub async fn run_sync(options: SyncOptions, data_dir: &Path) -> Result<(), CliError> {
    let config = load_effective_config().map_err(CliError::Config)?;
    let remote = remote_source(&config)?;
    let book = Arc::new(Mutex::new(open_book(data_dir)?));
    let service =
        SyncService::new(book, remote).with_push_local(options.push || config.push_local);

    if !options.watch {
        print_outcome(&service.sync_now().await);
        return Ok(());
    }

    let interval = sync_interval(&config, options.interval_secs);
    println!(
        "Syncing every {}s; press Ctrl-C to stop",
        interval.as_secs()
    );
    let shutdown = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", error);
            std::future::pending::<()>().await;
        }
    };
    service
        .run_periodic(interval, shutdown, |outcome| {
            if !matches!(outcome, SyncOutcome::Unchanged | SyncOutcome::Skipped) {
                print_outcome(outcome);
            }
        })
        .await;
    Ok(())
}

pub fn remote_source(config: &MuseConfig) -> Result<HttpRemoteSource, CliError> {
    let Some(url) = config.remote_url() else {
        return Err(CliError::SyncNotConfigured);
    };
    Ok(HttpRemoteSource::new(url)?.with_category(config.remote_category()))
}

/// Explicit `--interval` wins over the configured one; never below one second.
pub fn sync_interval(config: &MuseConfig, explicit_secs: Option<u64>) -> Duration {
    explicit_secs.map_or_else(|| config.sync_interval(), |secs| Duration::from_secs(secs.max(1)))
}

pub fn format_outcome_lines(outcome: &SyncOutcome) -> Vec<String> {
    match outcome {
        SyncOutcome::Applied(report) => format_change_report_lines(report),
        SyncOutcome::Unchanged => vec!["Quotes already up to date".to_string()],
        SyncOutcome::Skipped => vec!["Sync already in progress; skipped".to_string()],
        SyncOutcome::Failed(message) => vec![format!("Sync failed: {message}")],
    }
}

fn print_outcome(outcome: &SyncOutcome) {
    for line in format_outcome_lines(outcome) {
        println!("{line}");
    }
}
