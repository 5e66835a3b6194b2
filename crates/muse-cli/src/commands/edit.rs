use std::path::Path;

use muse_core::util::trimmed_non_empty;
use muse_core::QuoteEntry;

use crate::commands::common::{open_book, resolve_quote};
use crate::error::CliError;

pub fn run_edit(
    id: &str,
    text: Option<&str>,
    category: Option<&str>,
    data_dir: &Path,
) -> Result<(), CliError> {
    let text = text.and_then(trimmed_non_empty);
    let category = category.and_then(trimmed_non_empty);
    if text.is_none() && category.is_none() {
        return Err(CliError::NothingToEdit);
    }

    let mut book = open_book(data_dir)?;
    let quote = resolve_quote(id, &book)?;
    let edited = QuoteEntry::with_id(
        quote.id.clone(),
        text.unwrap_or_else(|| quote.text.clone()),
        category.unwrap_or_else(|| quote.category.clone()),
    );

    if edited.same_content(&quote) {
        println!("{}", quote.id);
        return Ok(());
    }

    book.replace(&quote.id, &edited)?;
    println!("{}", quote.id);
    Ok(())
}
