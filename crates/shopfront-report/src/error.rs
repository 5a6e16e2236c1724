use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Shown to the user as-is when an export has no input rows.
    #[error("No data to export")]
    NoData,

    #[error("report end date {end} is before start date {start}")]
    InvalidDateRange { start: String, end: String },

    #[error("unknown export format \"{0}\"; expected csv or excel")]
    UnknownFormat(String),

    #[error("unknown report kind \"{0}\"; expected sales, products or sellers")]
    UnknownKind(String),

    #[error("failed to write CSV: {0}")]
    Csv(String),
}
