//! Analyst report exports: raw backend rows in, display-ready tables out.

pub mod error;
pub mod export;
pub mod products;
pub mod records;
pub mod sales;
pub mod sellers;
pub mod table;

mod csv;
mod excel;

pub use error::ReportError;
pub use export::{export_filename, render, ExportFormat};
pub use products::products_report;
pub use records::{ProductRecord, SalesRecord, SellerRecord};
pub use sales::{sales_report, DateRange};
pub use sellers::{performance_score, sellers_report, PerformanceTier};
pub use table::{Cell, Column, ReportKind, ReportTable, Row, RowKind};
