use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::records::SalesRecord;
use crate::table::{Cell, Column, ReportKind, ReportTable, RowKind};
use crate::ReportError;

const COLUMNS: [Column; 7] = [
    Column {
        key: "orderNumber",
        header: "Order Number",
    },
    Column {
        key: "date",
        header: "Order Date",
    },
    Column {
        key: "customerName",
        header: "Customer Name",
    },
    Column {
        key: "customerEmail",
        header: "Customer Email",
    },
    Column {
        key: "totalAmount",
        header: "Total Amount ($)",
    },
    Column {
        key: "totalItems",
        header: "Items Count",
    },
    Column {
        key: "status",
        header: "Order Status",
    },
];

/// Inclusive reporting window for the sales export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if end < start {
            return Err(ReportError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The month ending on `end`, the window the analyst page opens with.
    #[must_use]
    pub fn last_month(end: NaiveDate) -> Self {
        let start = end
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(end);
        Self { start, end }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Build the sales table: one row per order, a separator, and a summary of
/// order count, revenue and item count over `range`.
///
/// # Errors
///
/// Returns [`ReportError::NoData`] when `records` is empty.
pub fn sales_report(
    records: &[SalesRecord],
    range: &DateRange,
) -> Result<ReportTable, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoData);
    }

    let mut table = ReportTable::new(ReportKind::Sales, &COLUMNS);
    let mut revenue = Decimal::ZERO;
    let mut items = 0u64;

    for record in records {
        let amount = record.total_amount.unwrap_or_default();
        let count = record.total_items.unwrap_or(0);
        revenue += amount;
        items += count;

        table.push(
            RowKind::Data,
            vec![
                Cell::text(record.order_number.as_str()),
                record.date.as_deref().map_or(Cell::Empty, date_cell),
                Cell::opt_text(record.customer_name.as_deref()),
                Cell::opt_text(record.customer_email.as_deref()),
                record.total_amount.map_or(Cell::Empty, Cell::Currency),
                record.total_items.map_or(Cell::Empty, Cell::count),
                Cell::opt_text(record.status.as_deref()),
            ],
        );
    }

    table.push(
        RowKind::Separator,
        vec![
            Cell::text("---"),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::text("---"),
        ],
    );
    table.push(
        RowKind::Summary,
        vec![
            Cell::text("SUMMARY"),
            Cell::text(range.to_string()),
            Cell::text(format!("{} Orders", records.len())),
            Cell::Empty,
            Cell::Currency(revenue),
            Cell::count(items),
            Cell::Empty,
        ],
    );

    tracing::debug!(orders = records.len(), %revenue, "built sales report");
    Ok(table)
}

/// Timestamps become date cells; anything unparseable is kept verbatim.
fn date_cell(raw: &str) -> Cell {
    parse_timestamp(raw).map_or_else(|| Cell::text(raw), Cell::Timestamp)
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(number: &str, amount: i64, items: u64) -> SalesRecord {
        SalesRecord {
            order_number: number.to_string(),
            date: Some("2024-03-05".to_string()),
            customer_name: Some("Ada Lovelace".to_string()),
            customer_email: Some("ada@example.com".to_string()),
            total_amount: Some(Decimal::new(amount, 0)),
            total_items: Some(items),
            status: Some("DELIVERED".to_string()),
        }
    }

    fn march() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn summary_totals_revenue_orders_and_items() {
        let records = vec![
            order("A", 100, 1),
            order("B", 200, 2),
            order("C", 300, 3),
            order("D", 400, 4),
        ];
        let table = sales_report(&records, &march()).unwrap();

        assert_eq!(table.data_rows().count(), 4);
        assert_eq!(
            table.summary_cell("customerName"),
            Some(&Cell::text("4 Orders"))
        );
        assert_eq!(
            table.summary_cell("totalAmount"),
            Some(&Cell::Currency(Decimal::new(1000, 0)))
        );
        assert_eq!(table.summary_cell("totalItems"), Some(&Cell::Integer(10)));
        assert_eq!(
            table.summary_cell("date"),
            Some(&Cell::text("2024-03-01 to 2024-03-31"))
        );
    }

    #[test]
    fn separator_precedes_summary() {
        let table = sales_report(&[order("A", 10, 1)], &march()).unwrap();
        let kinds: Vec<RowKind> = table.rows.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RowKind::Data, RowKind::Separator, RowKind::Summary]);
        assert_eq!(table.cell(1, "orderNumber"), Some(&Cell::text("---")));
        assert_eq!(table.cell(1, "status"), Some(&Cell::text("---")));
    }

    #[test]
    fn missing_amounts_count_as_zero() {
        let mut blank = order("A", 0, 0);
        blank.total_amount = None;
        blank.total_items = None;
        let table = sales_report(&[blank, order("B", 50, 2)], &march()).unwrap();
        assert_eq!(table.cell(0, "totalAmount"), Some(&Cell::Empty));
        assert_eq!(
            table.summary_cell("totalAmount"),
            Some(&Cell::Currency(Decimal::new(50, 0)))
        );
        assert_eq!(table.summary_cell("totalItems"), Some(&Cell::Integer(2)));
    }

    #[test]
    fn empty_input_is_no_data() {
        assert_eq!(sales_report(&[], &march()), Err(ReportError::NoData));
        assert_eq!(ReportError::NoData.to_string(), "No data to export");
    }

    #[test]
    fn date_cells_accept_dates_and_timestamps() {
        assert_eq!(
            parse_timestamp("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-05T14:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(14, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-05T14:30:00+02:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(12, 30, 0))
        );
        assert_eq!(date_cell("yesterday"), Cell::text("yesterday"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(matches!(
            DateRange::new(start, end),
            Err(ReportError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn last_month_spans_one_calendar_month() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let range = DateRange::last_month(end);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
