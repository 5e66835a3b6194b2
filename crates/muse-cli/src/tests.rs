use std::time::Duration;

use muse_core::config::MuseConfig;
use muse_core::export::ExportFormat as CoreExportFormat;
use muse_core::models::{ChangeReport, EntryChange, MergeConflict};
use muse_core::persistence::{JsonFileGateway, PersistenceGateway};
use muse_core::services::{QuoteBook, SyncOutcome};
use muse_core::store::seed_entries;
use muse_core::QuoteEntry;
use pretty_assertions::assert_eq;

use crate::cli::{CompletionShell, ExportFormat};
use crate::commands::common::{
    format_change_report_lines, format_quote_lines, normalize_quote_identifier, quote_origin,
    quote_preview, render_quote, resolve_quote, FileQuoteBook,
};
use crate::commands::completions::render_completions;
use crate::commands::export::core_format;
use crate::commands::sync::{format_outcome_lines, remote_source, sync_interval};
use crate::config_file::{apply_env_overrides, load_config_from_path, save_config_to_path};
use crate::error::CliError;

fn quote(id: &str, text: &str, category: &str) -> QuoteEntry {
    QuoteEntry::with_id(id.into(), text, category)
}

fn book_with(dir: &tempfile::TempDir, entries: &[QuoteEntry]) -> FileQuoteBook {
    let gateway = JsonFileGateway::new(dir.path().join("data"), dir.path().join("session"));
    gateway.save_entries(entries).unwrap();
    QuoteBook::open(gateway).unwrap()
}

#[test]
fn normalize_quote_identifier_rejects_blank() {
    assert!(matches!(
        normalize_quote_identifier("   "),
        Err(CliError::EmptyQuoteId)
    ));
    assert_eq!(normalize_quote_identifier(" srv-3 ").unwrap(), "srv-3");
}

#[test]
fn listed_ids_resolve_for_quotes_created_together() {
    let dir = tempfile::tempdir().unwrap();
    let entries = seed_entries();
    let book = book_with(&dir, &entries);

    let lines = format_quote_lines(&book.store().iter().collect::<Vec<_>>());
    for (line, entry) in lines.iter().zip(&entries) {
        let shown = line.split_whitespace().next().unwrap();
        assert_eq!(resolve_quote(shown, &book).unwrap().id, entry.id);
    }
}

#[test]
fn quote_origin_follows_id_prefix() {
    assert_eq!(quote_origin(&quote("srv-1", "A", "X")), "remote");
    assert_eq!(quote_origin(&quote("local-1", "A", "X")), "local");
}

#[test]
fn quote_preview_collapses_whitespace_and_truncates() {
    let entry = quote("local-1", "one\n two   three four", "X");
    assert_eq!(quote_preview(&entry, 50), "one two three four");
    assert_eq!(quote_preview(&entry, 10), "one two...");
}

#[test]
fn render_quote_shows_text_and_category() {
    let entry = quote("local-1", "Stay curious.", "Insight");
    assert_eq!(render_quote(&entry), "\"Stay curious.\"\n  — Insight");
}

#[test]
fn format_quote_lines_include_category() {
    let entry = quote("srv-7", "Keep going", "Motivation");
    let lines = format_quote_lines(&[&entry]);

    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("srv-7"));
    assert!(lines[0].ends_with("[Motivation]"));
}

#[test]
fn change_report_lines_offer_keep_local_hint_for_conflicts() {
    let report = ChangeReport {
        added: vec![quote("srv-2", "New one", "Server")],
        updated: vec![EntryChange {
            previous: quote("srv-1", "Old", "X"),
            current: quote("srv-1", "Old", "Y"),
        }],
        conflicts: vec![MergeConflict {
            local: quote("local-a", "Same text", "Mine"),
            remote: quote("srv-3", "Same text", "Theirs"),
        }],
        unchanged: 0,
    };

    let lines = format_change_report_lines(&report);

    assert!(lines[0].contains("remote wins"));
    assert!(lines.iter().any(|line| line.starts_with("  + srv-2")));
    assert!(lines.iter().any(|line| line.contains("[X] -> [Y]")));
    assert!(lines
        .iter()
        .any(|line| line.contains("keep local: muse edit srv-3 --category \"Mine\"")));
}

#[test]
fn outcome_lines_cover_every_sync_result() {
    assert_eq!(
        format_outcome_lines(&SyncOutcome::Unchanged),
        vec!["Quotes already up to date".to_string()]
    );
    assert_eq!(
        format_outcome_lines(&SyncOutcome::Failed("timeout".to_string())),
        vec!["Sync failed: timeout".to_string()]
    );
    assert!(format_outcome_lines(&SyncOutcome::Skipped)[0].contains("skipped"));
}

#[test]
fn resolve_quote_matches_exact_id_then_unique_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let book = book_with(
        &dir,
        &[
            quote("srv-1", "A", "X"),
            quote("srv-12", "B", "X"),
            quote("local-abc", "C", "Y"),
        ],
    );

    assert_eq!(resolve_quote("srv-1", &book).unwrap().text, "A");
    assert_eq!(resolve_quote("srv-12", &book).unwrap().text, "B");
    assert_eq!(resolve_quote("local-a", &book).unwrap().text, "C");
}

#[test]
fn resolve_quote_reports_ambiguous_and_missing_prefixes() {
    let dir = tempfile::tempdir().unwrap();
    let book = book_with(
        &dir,
        &[quote("srv-10", "A", "X"), quote("srv-11", "B", "X")],
    );

    assert!(matches!(
        resolve_quote("srv-1", &book),
        Err(CliError::AmbiguousQuoteId(_))
    ));
    assert!(matches!(
        resolve_quote("srv-9", &book),
        Err(CliError::QuoteNotFound(_))
    ));
}

#[test]
fn env_remote_url_overrides_config() {
    let config = MuseConfig {
        remote_url: Some("https://configured.example.com/quotes".to_string()),
        ..MuseConfig::default()
    };

    let overridden =
        apply_env_overrides(config.clone(), Some("https://env.example.com/quotes/".to_string()))
            .unwrap();
    assert_eq!(
        overridden.remote_url.as_deref(),
        Some("https://env.example.com/quotes")
    );

    let untouched = apply_env_overrides(config, Some("   ".to_string())).unwrap();
    assert_eq!(
        untouched.remote_url.as_deref(),
        Some("https://configured.example.com/quotes")
    );
}

#[test]
fn env_override_rejects_non_http_url() {
    assert!(apply_env_overrides(MuseConfig::default(), Some("ftp://x".to_string())).is_err());
}

#[test]
fn config_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = MuseConfig {
        remote_url: Some("https://quotes.example.com/api".to_string()),
        sync_interval_secs: 45,
        push_local: true,
        remote_category: Some("Feed".to_string()),
    };

    save_config_to_path(&config, &path).unwrap();

    assert_eq!(load_config_from_path(&path).unwrap(), config);
}

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_config_from_path(&dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded, MuseConfig::default());
}

#[test]
fn remote_source_requires_configured_url() {
    assert!(matches!(
        remote_source(&MuseConfig::default()),
        Err(CliError::SyncNotConfigured)
    ));

    let config = MuseConfig {
        remote_url: Some("https://quotes.example.com/api".to_string()),
        ..MuseConfig::default()
    };
    assert_eq!(
        remote_source(&config).unwrap().endpoint(),
        "https://quotes.example.com/api"
    );
}

#[test]
fn explicit_interval_wins_over_config() {
    let config = MuseConfig::default();
    assert_eq!(sync_interval(&config, None), Duration::from_secs(30));
    assert_eq!(sync_interval(&config, Some(7)), Duration::from_secs(7));
    assert_eq!(sync_interval(&config, Some(0)), Duration::from_secs(1));
}

#[test]
fn cli_export_format_maps_to_core() {
    assert_eq!(core_format(ExportFormat::Json), CoreExportFormat::Json);
    assert_eq!(core_format(ExportFormat::Markdown), CoreExportFormat::Markdown);
}

#[test]
fn export_into_directory_uses_timestamped_name() {
    let dir = tempfile::tempdir().unwrap();
    let target = crate::commands::export::export_target(dir.path(), ExportFormat::Markdown);

    assert_eq!(target.parent(), Some(dir.path()));
    let name = target.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("quotes-"));
    assert!(name.ends_with(".md"));

    let file = dir.path().join("out.json");
    assert_eq!(
        crate::commands::export::export_target(&file, ExportFormat::Json),
        file
    );
}

#[test]
fn completions_name_the_muse_binary() {
    let bash = render_completions(CompletionShell::Bash);
    assert!(bash.contains("muse"));
    assert!(bash.contains("sync"));

    assert!(render_completions(CompletionShell::Zsh).contains("#compdef muse"));
}
