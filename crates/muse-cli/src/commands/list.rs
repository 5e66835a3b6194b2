use std::path::Path;

use muse_core::selection::filter_pool;
use muse_core::CategorySelection;

use crate::commands::common::{format_quote_lines, open_book, quote_to_list_item, QuoteListItem};
use crate::error::CliError;

pub fn run_list(category: Option<&str>, as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let book = open_book(data_dir)?;
    let selection = category.map_or(CategorySelection::All, CategorySelection::parse);
    let quotes = filter_pool(book.store(), &selection);

    if as_json {
        let json_items = quotes
            .iter()
            .map(|quote| quote_to_list_item(quote))
            .collect::<Vec<QuoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if quotes.is_empty() {
        println!("No quotes for this category yet.");
    } else {
        for line in format_quote_lines(&quotes) {
            println!("{line}");
        }
    }

    Ok(())
}
