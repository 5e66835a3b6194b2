use std::path::Path;

use crate::commands::common::open_book;
use crate::error::CliError;

pub fn run_import(path: &Path, data_dir: &Path) -> Result<(), CliError> {
    let payload = std::fs::read_to_string(path)?;

    let mut book = open_book(data_dir)?;
    let summary = book.import_batch(&payload)?;

    println!("Imported {} quotes", summary.imported.len());
    if summary.skipped > 0 {
        println!("Skipped {} records without text", summary.skipped);
    }
    Ok(())
}
