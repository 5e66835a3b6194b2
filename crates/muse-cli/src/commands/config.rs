use muse_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_file::{
    default_config_path, load_config_from_path, load_effective_config, save_config_to_path,
};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            remote_url,
            interval,
            push_local,
            remote_category,
        } => run_config_init(remote_url, interval, push_local, remote_category),
        ConfigCommands::Show => run_config_show(),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run_config_init(
    remote_url: Option<String>,
    interval: Option<u64>,
    push_local: Option<bool>,
    remote_category: Option<String>,
) -> Result<(), CliError> {
    let path = default_config_path().map_err(CliError::Config)?;
    let mut config = load_config_from_path(&path).map_err(CliError::Config)?;

    if let Some(url) = normalize_text_option(remote_url) {
        config.remote_url = Some(url);
    }
    if let Some(secs) = interval {
        config.sync_interval_secs = secs;
    }
    if let Some(enabled) = push_local {
        config.push_local = enabled;
    }
    if let Some(category) = normalize_text_option(remote_category) {
        config.remote_category = Some(category);
    }

    save_config_to_path(&config, &path).map_err(CliError::Config)?;
    println!("{}", path.display());
    Ok(())
}

pub fn run_config_show() -> Result<(), CliError> {
    let config = load_effective_config().map_err(CliError::Config)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
