use std::path::Path;

use crate::commands::common::{open_book, resolve_quote_text};
use crate::error::CliError;

pub fn run_add(text_parts: &[String], category: &str, data_dir: &Path) -> Result<(), CliError> {
    let text = resolve_quote_text(text_parts)?;

    let mut book = open_book(data_dir)?;
    let quote = book.add(&text, category)?;
    book.select(&quote.category)?;
    book.remember_viewed(&quote)?;

    println!("{}", quote.id);
    Ok(())
}
