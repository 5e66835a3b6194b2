//! Remote quote source and its HTTP client.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{CategorySelection, QuoteEntry, QuoteId};
use crate::util::{compact_text, is_http_url, normalize_text_option};

/// Category for remote records that do not carry one.
pub const DEFAULT_REMOTE_CATEGORY: &str = "Server";

const REMOTE_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid remote configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Remote HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote API error: {0}")]
    Api(String),
    #[error("Invalid remote payload: {0}")]
    InvalidPayload(String),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Where remote batches come from.
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
    /// Fetch the remote batch, already validated into quotes.
    async fn fetch_batch(&self) -> TransportResult<Vec<QuoteEntry>>;

    /// Offer local quotes to the remote. Best effort.
    async fn push_local(&self, entries: &[QuoteEntry]) -> TransportResult<()>;
}

/// JSON-over-HTTP remote.
///
/// Accepts records shaped `{id, text, category}` as well as the
/// placeholder-API post shape `{id, title, body}`.
#[derive(Clone)]
pub struct HttpRemoteSource {
    endpoint: String,
    category: String,
    client: reqwest::Client,
}

impl HttpRemoteSource {
    pub fn new(endpoint: impl Into<String>) -> TransportResult<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        Ok(Self {
            endpoint,
            category: DEFAULT_REMOTE_CATEGORY.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REMOTE_HTTP_TIMEOUT_SECS))
                .build()?,
        })
    }

    /// Category assigned to records without one.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        if let Some(category) = selectable_category(Some(category.into())) {
            self.category = category;
        }
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RemoteSource for HttpRemoteSource {
    async fn fetch_batch(&self) -> TransportResult<Vec<QuoteEntry>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api(parse_api_error(status, &body)));
        }

        let body = response.text().await?;
        parse_remote_batch(&body, &self.category)
    }

    async fn push_local(&self, entries: &[QuoteEntry]) -> TransportResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(entries)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api(parse_api_error(status, &body)));
        }
        Ok(())
    }
}

/// Parse a remote payload into quotes, dropping records without a usable id
/// or text.
pub fn parse_remote_batch(
    payload: &str,
    default_category: &str,
) -> TransportResult<Vec<QuoteEntry>> {
    let records: Vec<Value> = match serde_json::from_str(payload) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            return Err(TransportError::InvalidPayload(
                "expected a JSON array of records".to_string(),
            ))
        }
        Err(error) => return Err(TransportError::InvalidPayload(error.to_string())),
    };

    let mut batch = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        let parsed = serde_json::from_value::<RemoteRecord>(record)
            .map_err(|error| error.to_string())
            .and_then(|record| record.into_entry(default_category));
        match parsed {
            Ok(entry) => batch.push(entry),
            Err(reason) => {
                tracing::warn!("Rejected remote record #{}: {}", position, reason);
            }
        }
    }
    Ok(batch)
}

#[derive(Debug, Deserialize)]
struct RemoteRecord {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl RemoteRecord {
    fn into_entry(self, default_category: &str) -> Result<QuoteEntry, String> {
        let id = match self.id {
            Some(Value::Number(number)) => QuoteId::remote(number),
            Some(Value::String(raw)) => {
                let raw = normalize_text_option(Some(raw)).ok_or("record id is blank")?;
                if raw.starts_with("srv-") {
                    QuoteId::from(raw)
                } else {
                    QuoteId::remote(raw)
                }
            }
            Some(_) => return Err("record id must be a number or string".to_string()),
            None => return Err("record has no id".to_string()),
        };

        let text = normalize_text_option(self.text)
            .or_else(|| normalize_text_option(self.title))
            .or_else(|| normalize_text_option(self.body))
            .ok_or("record has no text")?;

        let category = selectable_category(self.category)
            .unwrap_or_else(|| default_category.to_string());

        Ok(QuoteEntry::with_id(id, text, category))
    }
}

/// A category that can be selected on its own; blank and `all` do not qualify.
fn selectable_category(value: Option<String>) -> Option<String> {
    normalize_text_option(value).filter(|category| !CategorySelection::parse(category).is_all())
}

#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<RemoteErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn normalize_endpoint(raw: String) -> TransportResult<String> {
    let endpoint = normalize_text_option(Some(raw)).ok_or_else(|| {
        TransportError::InvalidConfiguration("endpoint must not be empty".to_string())
    })?;
    if is_http_url(&endpoint) {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(TransportError::InvalidConfiguration(
            "endpoint must include http:// or https://".to_string(),
        ))
    }
}
