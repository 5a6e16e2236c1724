use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sales,
    Products,
    Sellers,
}

impl ReportKind {
    /// File name stem, prefixed with the platform's store name.
    #[must_use]
    pub fn base_name(self, platform: &str) -> String {
        let suffix = match self {
            ReportKind::Sales => "Sales_Report",
            ReportKind::Products => "Products_Catalog",
            ReportKind::Sellers => "Sellers_Performance",
        };
        format!("{platform}_{suffix}")
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Sales => write!(f, "sales"),
            ReportKind::Products => write!(f, "products"),
            ReportKind::Sellers => write!(f, "sellers"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(ReportKind::Sales),
            "products" => Ok(ReportKind::Products),
            "sellers" => Ok(ReportKind::Sellers),
            other => Err(ReportError::UnknownKind(other.to_string())),
        }
    }
}

/// A typed table cell. Renderers decide the textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    /// Money, rendered with two decimals.
    Currency(Decimal),
    Timestamp(NaiveDateTime),
}

impl Cell {
    pub(crate) fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub(crate) fn opt_text(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, Cell::text)
    }

    pub(crate) fn count(value: u64) -> Self {
        Cell::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Data,
    /// The `---` row between data and summary.
    Separator,
    Summary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

/// Export-ready table: data rows, then a separator row, then one summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub kind: ReportKind,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl ReportTable {
    pub(crate) fn new(kind: ReportKind, columns: &[Column]) -> Self {
        Self {
            kind,
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, kind: RowKind, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(Row { kind, cells });
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.kind == RowKind::Data)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.kind == RowKind::Summary)
    }

    /// Look up a cell by row index and column key.
    #[must_use]
    pub fn cell(&self, row: usize, key: &str) -> Option<&Cell> {
        let column = self.columns.iter().position(|c| c.key == key)?;
        self.rows.get(row)?.cells.get(column)
    }

    #[must_use]
    pub fn summary_cell(&self, key: &str) -> Option<&Cell> {
        let column = self.columns.iter().position(|c| c.key == key)?;
        self.summary()?.cells.get(column)
    }
}
