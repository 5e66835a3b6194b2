use std::io::{self, IsTerminal, Read};
use std::path::Path;

use muse_core::models::{ChangeReport, QuoteEntry, QuoteId};
use muse_core::persistence::JsonFileGateway;
use muse_core::services::QuoteBook;
use muse_core::util::{compact_text, trimmed_non_empty};
use serde::Serialize;

use crate::error::CliError;

pub type FileQuoteBook = QuoteBook<JsonFileGateway>;

#[derive(Debug, Serialize)]
pub struct QuoteListItem {
    pub id: String,
    pub text: String,
    pub category: String,
    pub origin: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoryItem {
    pub name: String,
    pub count: usize,
    pub selected: bool,
}

pub fn open_book(data_dir: &Path) -> Result<FileQuoteBook, CliError> {
    let gateway = JsonFileGateway::with_default_session_dir(data_dir);
    Ok(QuoteBook::open(gateway)?)
}

/// Find a quote by exact id, then by unique id prefix.
pub fn resolve_quote(query: &str, book: &FileQuoteBook) -> Result<QuoteEntry, CliError> {
    let query = normalize_quote_identifier(query)?;
    let store = book.store();

    if let Some(quote) = store.find_by_id(&QuoteId::from(query.as_str())) {
        return Ok(quote.clone());
    }

    let matches = store.find_by_id_prefix(&query);
    match matches.as_slice() {
        [] => Err(CliError::QuoteNotFound(query)),
        [quote] => Ok((*quote).clone()),
        _ => {
            let options = matches
                .iter()
                .take(3)
                .map(|quote| quote.id.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousQuoteId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn normalize_quote_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyQuoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Quote text from arguments, falling back to piped stdin.
pub fn resolve_quote_text(text_parts: &[String]) -> Result<String, CliError> {
    if let Some(text) = trimmed_non_empty(&text_parts.join(" ")) {
        return Ok(text);
    }

    if let Some(text) = read_piped_stdin()? {
        return Ok(text);
    }

    Err(CliError::EmptyText)
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(trimmed_non_empty(&buffer))
}

pub fn quote_origin(quote: &QuoteEntry) -> &'static str {
    if quote.id.is_remote() {
        "remote"
    } else {
        "local"
    }
}

pub fn format_quote_lines(quotes: &[&QuoteEntry]) -> Vec<String> {
    quotes
        .iter()
        .map(|quote| {
            let preview = quote_preview(quote, 50);
            format!("{:<42}  {preview:<50}  [{}]", quote.id.as_str(), quote.category)
        })
        .collect()
}

pub fn quote_to_list_item(quote: &QuoteEntry) -> QuoteListItem {
    QuoteListItem {
        id: quote.id.to_string(),
        text: quote.text.clone(),
        category: quote.category.clone(),
        origin: quote_origin(quote),
    }
}

pub fn quote_preview(quote: &QuoteEntry, max_chars: usize) -> String {
    let collapsed = compact_text(&quote.text);

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// Full quote as shown to the reader.
pub fn render_quote(quote: &QuoteEntry) -> String {
    format!("\"{}\"\n  — {}", quote.text, quote.category)
}

/// Notification lines for a sync result, including how to keep the local
/// version of each conflicting quote.
pub fn format_change_report_lines(report: &ChangeReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Quotes updated from remote (remote wins on conflict): {}",
        report.summary()
    )];

    for quote in &report.added {
        lines.push(format!("  + {}  {}", quote.id, quote_preview(quote, 50)));
    }
    for change in &report.updated {
        lines.push(format!(
            "  ~ {}  [{}] -> [{}]  {}",
            change.current.id,
            change.previous.category,
            change.current.category,
            quote_preview(&change.current, 40)
        ));
    }
    for conflict in &report.conflicts {
        lines.push(format!(
            "  ! {}  local [{}] replaced by remote [{}]  {}",
            conflict.remote.id,
            conflict.local.category,
            conflict.remote.category,
            quote_preview(&conflict.local, 40)
        ));
        lines.push(format!(
            "    keep local: muse edit {} --category \"{}\"",
            conflict.remote.id, conflict.local.category
        ));
    }

    lines
}
