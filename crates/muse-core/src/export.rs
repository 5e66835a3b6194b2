//! Quote import/export codec shared by every client.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{QuoteEntry, QuoteId, IMPORTED_CATEGORY};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render quotes as a pretty-printed JSON array (`id`, `text`, `category`).
pub fn export_all(entries: &[QuoteEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// Render quotes in Markdown with a frontmatter block per quote.
#[must_use]
pub fn render_markdown_export(entries: &[QuoteEntry]) -> String {
    let mut output = String::new();

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", entry.id);
        let _ = writeln!(output, "category: {}", entry.category);
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        for line in entry.text.lines() {
            let _ = writeln!(output, "> {line}");
        }
    }

    output
}

/// Render quotes based on selected export format.
pub fn render_export(entries: &[QuoteEntry], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => export_all(entries),
        ExportFormat::Markdown => Ok(render_markdown_export(entries)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("quotes-{timestamp_ms}.{}", format.extension())
}

/// Parse an exported (or hand-written) JSON array into fresh quotes.
///
/// Every record gets a new local id, so importing the same file twice yields
/// two copies. Missing text falls back to `title`, then to an empty string
/// (callers reject those with the usual validation). Missing category falls
/// back to `categoryName`, then to [`IMPORTED_CATEGORY`].
pub fn import_batch(payload: &str) -> Result<Vec<QuoteEntry>> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|error| Error::Format(format!("not valid JSON: {error}")))?;
    let Value::Array(records) = value else {
        return Err(Error::Format(
            "top-level value must be an array of quotes".to_string(),
        ));
    };

    Ok(records.iter().map(normalize_import_record).collect())
}

fn normalize_import_record(record: &Value) -> QuoteEntry {
    let text = string_field(record, &["text", "title"]).unwrap_or_default();
    let category = string_field(record, &["category", "categoryName"])
        .unwrap_or_else(|| IMPORTED_CATEGORY.to_string());
    QuoteEntry::with_id(QuoteId::local(), text, category)
}

/// First non-blank string among `keys`, trimmed.
fn string_field(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quote(id: &str, text: &str, category: &str) -> QuoteEntry {
        QuoteEntry::with_id(id.into(), text, category)
    }

    #[test]
    fn export_all_uses_stable_field_order() {
        let rendered = export_all(&[quote("local-1", "A", "X")]).unwrap();
        let id_at = rendered.find("\"id\"").unwrap();
        let text_at = rendered.find("\"text\"").unwrap();
        let category_at = rendered.find("\"category\"").unwrap();
        assert!(id_at < text_at && text_at < category_at);
        assert!(rendered.trim_start().starts_with('['));
    }

    #[test]
    fn import_rejects_non_array() {
        assert!(matches!(
            import_batch(r#"{"text": "A"}"#),
            Err(Error::Format(_))
        ));
        assert!(matches!(import_batch("not json"), Err(Error::Format(_))));
    }

    #[test]
    fn import_normalizes_missing_fields() {
        let payload = r#"[
            {"id": "keep-me", "text": "A", "category": "X"},
            {"title": "From title"},
            {"text": "B", "categoryName": "Legacy"},
            {"category": "Y"},
            42
        ]"#;
        let imported = import_batch(payload).unwrap();

        assert_eq!(imported.len(), 5);
        assert_ne!(imported[0].id.as_str(), "keep-me");
        assert!(imported[0].id.is_local());
        assert_eq!(imported[1].text, "From title");
        assert_eq!(imported[1].category, IMPORTED_CATEGORY);
        assert_eq!(imported[2].category, "Legacy");
        assert_eq!(imported[3].text, "");
        assert_eq!(imported[4].category, IMPORTED_CATEGORY);
    }

    #[test]
    fn round_trip_regenerates_ids() {
        let entries = vec![quote("local-1", "A", "X"), quote("srv-2", "B", "Y")];
        let imported = import_batch(&export_all(&entries).unwrap()).unwrap();

        assert_eq!(imported.len(), 2);
        for (original, copy) in entries.iter().zip(&imported) {
            assert!(original.same_content(copy));
            assert_ne!(original.id, copy.id);
        }
    }

    #[test]
    fn render_markdown_export_includes_frontmatter_and_text() {
        let rendered = render_markdown_export(&[quote("local-1", "Hello\nWorld", "X")]);
        assert!(rendered.contains("id: local-1"));
        assert!(rendered.contains("category: X"));
        assert!(rendered.contains("> Hello\n> World"));
    }

    #[test]
    fn suggested_export_file_name_uses_format_extension() {
        assert_eq!(
            suggested_export_file_name(ExportFormat::Json, 123),
            "quotes-123.json"
        );
        assert_eq!(
            suggested_export_file_name(ExportFormat::Markdown, 456),
            "quotes-456.md"
        );
    }
}
