//! Muse CLI - collect, filter and sync quotes from the terminal.

mod cli;
mod commands;
mod config_file;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::categories::run_categories;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::random::{run_filter, run_last, run_random};
use crate::commands::sync::{run_sync, SyncOptions};
use crate::config_file::resolve_data_dir;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("muse=info,muse_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell, output }) => {
            return run_completions(shell, output.as_deref());
        }
        Some(Commands::Config { command }) => return run_config(command),
        _ => {}
    }

    let data_dir = resolve_data_dir(cli.data_dir).map_err(CliError::Config)?;

    match cli.command {
        Some(Commands::Add { text, category }) => run_add(&text, &category, &data_dir)?,
        Some(Commands::List { category, json }) => run_list(category.as_deref(), json, &data_dir)?,
        Some(Commands::Categories { json }) => run_categories(json, &data_dir)?,
        Some(Commands::Random { category }) => run_random(category.as_deref(), &data_dir)?,
        Some(Commands::Filter { category }) => run_filter(&category, &data_dir)?,
        Some(Commands::Last) => run_last(&data_dir)?,
        Some(Commands::Edit { id, text, category }) => {
            run_edit(&id, text.as_deref(), category.as_deref(), &data_dir)?;
        }
        Some(Commands::Export { format, output }) => {
            run_export(format, output.as_deref(), &data_dir)?;
        }
        Some(Commands::Import { path }) => run_import(&path, &data_dir)?,
        Some(Commands::Sync {
            watch,
            interval,
            push,
        }) => {
            let options = SyncOptions {
                watch,
                interval_secs: interval,
                push,
            };
            run_sync(options, &data_dir).await?;
        }
        Some(Commands::Completions { .. } | Commands::Config { .. }) => {}
        // bare `muse` shows a quote from the saved selection
        None => run_random(None, &data_dir)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
