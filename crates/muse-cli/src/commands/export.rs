use std::path::{Path, PathBuf};

use chrono::Utc;
use muse_core::export::{suggested_export_file_name, ExportFormat as CoreExportFormat};

use crate::cli::ExportFormat;
use crate::commands::common::open_book;
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    data_dir: &Path,
) -> Result<(), CliError> {
    let book = open_book(data_dir)?;
    let rendered = book.export(core_format(format))?;

    if let Some(path) = output_path {
        let path = export_target(path, format);
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

pub const fn core_format(format: ExportFormat) -> CoreExportFormat {
    match format {
        ExportFormat::Json => CoreExportFormat::Json,
        ExportFormat::Markdown => CoreExportFormat::Markdown,
    }
}

/// A directory target gets a timestamped file name inside it.
pub fn export_target(path: &Path, format: ExportFormat) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(
            core_format(format),
            Utc::now().timestamp_millis(),
        ))
    } else {
        path.to_path_buf()
    }
}
