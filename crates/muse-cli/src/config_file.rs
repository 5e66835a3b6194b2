//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use muse_core::config::{parse_config, MuseConfig};
use muse_core::util::normalize_text_option;

const CONFIG_FILE_NAME: &str = "config.json";
const REMOTE_URL_ENV: &str = "MUSE_REMOTE_URL";

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join("muse").join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

/// Config file contents with environment overrides applied.
pub fn load_effective_config() -> Result<MuseConfig, String> {
    let config = load_config_from_path(&default_config_path()?)?;
    apply_env_overrides(config, std::env::var(REMOTE_URL_ENV).ok())
}

pub fn load_config_from_path(path: &Path) -> Result<MuseConfig, String> {
    if !path.exists() {
        return Ok(MuseConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
    parse_config(&raw)
        .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))
}

pub fn save_config_to_path(config: &MuseConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create config directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }

    let normalized = config.clone().validate()?;
    let serialized = serde_json::to_string_pretty(&normalized)
        .map_err(|error| format!("Failed to serialize config: {error}"))?;
    std::fs::write(path, serialized)
        .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
}

/// An explicit remote URL from the environment replaces the configured one.
pub fn apply_env_overrides(
    mut config: MuseConfig,
    remote_url: Option<String>,
) -> Result<MuseConfig, String> {
    if let Some(url) = normalize_text_option(remote_url) {
        config.remote_url = Some(url);
    }
    config.validate()
}

pub fn resolve_data_dir(cli_data_dir: Option<PathBuf>) -> Result<PathBuf, String> {
    if let Some(dir) = cli_data_dir.or_else(|| std::env::var_os("MUSE_DATA_DIR").map(PathBuf::from)) {
        return Ok(dir);
    }
    default_data_dir()
}

pub fn default_data_dir() -> Result<PathBuf, String> {
    dirs::data_dir()
        .map(|dir| dir.join("muse"))
        .ok_or_else(|| "Failed to resolve CLI data directory".to_string())
}
