use std::path::Path;

use muse_core::categories::category_counts;

use crate::commands::common::{open_book, CategoryItem};
use crate::error::CliError;

pub fn run_categories(as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let book = open_book(data_dir)?;
    let selected = book.selection();
    let items = category_counts(book.store())
        .into_iter()
        .map(|(name, count)| CategoryItem {
            selected: selected.as_str() == name,
            name,
            count,
        })
        .collect::<Vec<_>>();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let marker = |selected: bool| if selected { '*' } else { ' ' };
    println!("{} all ({})", marker(selected.is_all()), book.store().len());
    for item in items {
        println!("{} {} ({})", marker(item.selected), item.name, item.count);
    }
    Ok(())
}
