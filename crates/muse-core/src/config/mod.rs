//! Client configuration shared by every Muse front end.
//!
//! Provides `MuseConfig`, which tells clients where the remote quote source
//! lives and how often to reconcile with it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::CategorySelection;
use crate::remote::DEFAULT_REMOTE_CATEGORY;
use crate::util::{is_http_url, normalize_text_option};

const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;
const MIN_SYNC_INTERVAL_SECS: u64 = 5;

/// Persisted client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MuseConfig {
    /// Remote quote endpoint; sync is disabled when absent.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Seconds between periodic syncs.
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
    /// Offer local quotes to the remote after each merge.
    #[serde(default)]
    pub push_local: bool,
    /// Category for remote records that carry none.
    #[serde(default)]
    pub remote_category: Option<String>,
}

impl Default for MuseConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            push_local: false,
            remote_category: None,
        }
    }
}

impl MuseConfig {
    #[must_use]
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    #[must_use]
    pub fn remote_url(&self) -> Option<String> {
        normalize_text_option(self.remote_url.clone())
    }

    #[must_use]
    pub fn remote_category(&self) -> String {
        normalize_text_option(self.remote_category.clone())
            .unwrap_or_else(|| DEFAULT_REMOTE_CATEGORY.to_string())
    }

    /// Trim optional fields and check the remaining values.
    pub fn validate(mut self) -> Result<Self, String> {
        self.remote_url = match normalize_text_option(self.remote_url) {
            Some(url) if is_http_url(&url) => Some(url.trim_end_matches('/').to_string()),
            Some(_) => return Err("remote_url must include http:// or https://".to_string()),
            None => None,
        };
        self.remote_category = normalize_text_option(self.remote_category);
        if self
            .remote_category
            .as_deref()
            .is_some_and(|category| CategorySelection::parse(category).is_all())
        {
            return Err("remote_category cannot be 'all'".to_string());
        }
        if self.sync_interval_secs < MIN_SYNC_INTERVAL_SECS {
            return Err(format!(
                "sync_interval_secs must be at least {MIN_SYNC_INTERVAL_SECS}"
            ));
        }
        Ok(self)
    }
}

/// Parse and validate a config payload.
pub fn parse_config(payload: &str) -> Result<MuseConfig, String> {
    let config: MuseConfig =
        serde_json::from_str(payload).map_err(|error| format!("invalid config JSON: {error}"))?;
    config.validate()
}

const fn default_sync_interval_secs() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}
