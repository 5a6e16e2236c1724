use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::records::SellerRecord;
use crate::table::{Cell, Column, ReportKind, ReportTable, RowKind};
use crate::ReportError;

const COLUMNS: [Column; 8] = [
    Column {
        key: "rank",
        header: "Rank",
    },
    Column {
        key: "sellerName",
        header: "Seller Name",
    },
    Column {
        key: "storeName",
        header: "Store Name",
    },
    Column {
        key: "totalRevenue",
        header: "Total Revenue ($)",
    },
    Column {
        key: "productsSold",
        header: "Products Sold",
    },
    Column {
        key: "totalOrders",
        header: "Total Orders",
    },
    Column {
        key: "avgOrderValue",
        header: "Avg Order Value ($)",
    },
    Column {
        key: "performanceScore",
        header: "Performance Score",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    Excellent,
    Good,
    Average,
    New,
}

impl PerformanceTier {
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => PerformanceTier::Excellent,
            60..=79 => PerformanceTier::Good,
            40..=59 => PerformanceTier::Average,
            _ => PerformanceTier::New,
        }
    }
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceTier::Excellent => write!(f, "Excellent"),
            PerformanceTier::Good => write!(f, "Good"),
            PerformanceTier::Average => write!(f, "Average"),
            PerformanceTier::New => write!(f, "New"),
        }
    }
}

/// Seller performance on a 0–100 scale.
///
/// Revenue contributes up to 40 points (one per $10,000), orders up to 30
/// (two each) and units sold up to 30 (half a point each).
#[must_use]
pub fn performance_score(revenue: Decimal, orders: u64, products_sold: u64) -> u32 {
    let revenue_points = (revenue / Decimal::from(10_000)).min(Decimal::from(40));
    let order_points = Decimal::from(orders.saturating_mul(2)).min(Decimal::from(30));
    let sold_points = (Decimal::from(products_sold) / Decimal::TWO).min(Decimal::from(30));

    (revenue_points.max(Decimal::ZERO) + order_points + sold_points)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Build the seller performance table with average order value and score.
///
/// # Errors
///
/// Returns [`ReportError::NoData`] when `records` is empty.
pub fn sellers_report(records: &[SellerRecord]) -> Result<ReportTable, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoData);
    }

    let mut table = ReportTable::new(ReportKind::Sellers, &COLUMNS);
    let mut total_revenue = Decimal::ZERO;
    let mut total_sold = 0u64;
    let mut total_orders = 0u64;

    for (index, record) in records.iter().enumerate() {
        let revenue = record.total_revenue.unwrap_or_default();
        let sold = record.products_sold.unwrap_or(0);
        let orders = record.total_orders.unwrap_or(0);
        total_revenue += revenue;
        total_sold += sold;
        total_orders += orders;

        let average_order = if orders == 0 {
            Decimal::ZERO
        } else {
            (revenue / Decimal::from(orders))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        let score = performance_score(revenue, orders, sold);
        let rank = record
            .rank
            .map_or_else(|| Cell::count(index as u64 + 1), |r| Cell::Integer(i64::from(r)));

        table.push(
            RowKind::Data,
            vec![
                rank,
                Cell::opt_text(record.seller_name.as_deref()),
                Cell::opt_text(record.store_name.as_deref()),
                Cell::Currency(revenue),
                Cell::count(sold),
                Cell::count(orders),
                Cell::Currency(average_order),
                Cell::text(format!("{score} {}", PerformanceTier::from_score(score))),
            ],
        );
    }

    let mut separator = vec![Cell::Empty; COLUMNS.len()];
    separator[0] = Cell::text("---");
    table.push(RowKind::Separator, separator);

    table.push(
        RowKind::Summary,
        vec![
            Cell::text("TOTAL"),
            Cell::text(format!("{} Sellers", records.len())),
            Cell::Empty,
            Cell::Currency(total_revenue),
            Cell::count(total_sold),
            Cell::count(total_orders),
            Cell::Empty,
            Cell::Empty,
        ],
    );

    tracing::debug!(sellers = records.len(), %total_revenue, "built sellers report");
    Ok(table)
}
