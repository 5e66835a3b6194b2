use std::path::Path;

use crate::commands::common::{open_book, render_quote, FileQuoteBook};
use crate::error::CliError;

pub fn run_random(category: Option<&str>, data_dir: &Path) -> Result<(), CliError> {
    let mut book = open_book(data_dir)?;
    if let Some(category) = category {
        book.select(category)?;
    }
    show_random(&mut book)
}

/// Select `category` (or `all`), then show a quote from it.
pub fn run_filter(category: &str, data_dir: &Path) -> Result<(), CliError> {
    let mut book = open_book(data_dir)?;
    let selection = book.select(category)?;
    println!("Showing quotes from: {selection}");
    show_random(&mut book)
}

/// Last quote viewed in this session, or a fresh pick when there is none.
pub fn run_last(data_dir: &Path) -> Result<(), CliError> {
    let mut book = open_book(data_dir)?;
    match book.last_viewed()? {
        Some(quote) => {
            println!("{}", render_quote(&quote));
            Ok(())
        }
        None => show_random(&mut book),
    }
}

fn show_random(book: &mut FileQuoteBook) -> Result<(), CliError> {
    match book.pick_random(&mut rand::rng()) {
        Ok(quote) => {
            println!("{}", render_quote(&quote));
            Ok(())
        }
        Err(muse_core::Error::EmptyPool(_)) => {
            println!("No quotes for this category yet.");
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}
