//! Spreadsheet report of a store directory scrape.

mod error;
mod layout;
mod summary;
mod workbook;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use storedir_core::ScrapeResult;

pub use error::ReportError;
pub use layout::{plan_rows, CountryGroup, ReportLayout, COLUMN_WIDTHS, HEADERS};
pub use summary::{summarize, RunSummary};
pub use workbook::write_workbook;

/// File name of the report produced at `timestamp`.
#[must_use]
pub fn report_file_name(timestamp: NaiveDateTime) -> String {
    format!("stores_{}.xlsx", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes the report for `result` into `output_dir`, creating the directory
/// if needed, and returns the path of the written file.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory cannot be created and
/// [`ReportError::Xlsx`] if the workbook cannot be written.
pub fn export_report(
    result: &ScrapeResult,
    output_dir: &Path,
    timestamp: NaiveDateTime,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(report_file_name(timestamp));
    write_workbook(result, &path)?;
    tracing::info!(path = %path.display(), countries = result.len(), "report written");
    Ok(path)
}
