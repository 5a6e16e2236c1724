use std::str::FromStr;

use chrono::NaiveDate;

use crate::table::{ReportKind, ReportTable};
use crate::{csv, excel, ReportError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    /// HTML table saved with an `.xls` extension.
    Excel,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xls",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xls" => Ok(ExportFormat::Excel),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render `table` as the text of an export file.
///
/// # Errors
///
/// Returns [`ReportError::Csv`] if the CSV writer fails.
pub fn render(table: &ReportTable, format: ExportFormat) -> Result<String, ReportError> {
    match format {
        ExportFormat::Csv => csv::render(table),
        ExportFormat::Excel => Ok(excel::render(table)),
    }
}

/// `<Base>_<YYYY-MM-DD>.<ext>`, dated with the export day.
#[must_use]
pub fn export_filename(
    kind: ReportKind,
    platform: &str,
    format: ExportFormat,
    on: NaiveDate,
) -> String {
    format!(
        "{}_{}.{}",
        kind.base_name(platform),
        on.format("%Y-%m-%d"),
        format.extension()
    )
}
