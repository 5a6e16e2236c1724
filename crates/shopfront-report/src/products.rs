use rust_decimal::Decimal;

use crate::records::ProductRecord;
use crate::table::{Cell, Column, ReportKind, ReportTable, RowKind};
use crate::ReportError;

const COLUMNS: [Column; 10] = [
    Column {
        key: "asin",
        header: "ASIN",
    },
    Column {
        key: "productName",
        header: "Product Name",
    },
    Column {
        key: "category",
        header: "Category",
    },
    Column {
        key: "price",
        header: "Price ($)",
    },
    Column {
        key: "stockQuantity",
        header: "Stock Quantity",
    },
    Column {
        key: "rating",
        header: "Rating (1-5)",
    },
    Column {
        key: "reviewsCount",
        header: "Reviews Count",
    },
    Column {
        key: "salesCount",
        header: "Total Sales",
    },
    Column {
        key: "seller",
        header: "Seller",
    },
    Column {
        key: "revenue",
        header: "Total Revenue ($)",
    },
];

/// Build the product catalog table with a derived revenue column.
///
/// Revenue is `price × salesCount` with missing values as zero. The summary
/// averages rating over rated products only.
///
/// # Errors
///
/// Returns [`ReportError::NoData`] when `records` is empty.
pub fn products_report(records: &[ProductRecord]) -> Result<ReportTable, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoData);
    }

    let mut table = ReportTable::new(ReportKind::Products, &COLUMNS);
    let mut total_revenue = Decimal::ZERO;
    let mut total_stock = 0i64;
    let mut rating_sum = 0.0;
    let mut rated = 0u32;

    for record in records {
        let revenue =
            record.price.unwrap_or_default() * Decimal::from(record.sales_count.unwrap_or(0));
        let stock = record.stock_quantity.unwrap_or(0);
        total_revenue += revenue;
        total_stock += stock;
        if let Some(rating) = record.rating.filter(|r| *r > 0.0) {
            rating_sum += rating;
            rated += 1;
        }

        table.push(
            RowKind::Data,
            vec![
                Cell::text(record.asin.as_str()),
                Cell::opt_text(record.product_name.as_deref()),
                Cell::opt_text(record.category.as_deref()),
                record.price.map_or(Cell::Empty, Cell::Currency),
                Cell::Integer(stock),
                record.rating.map_or(Cell::Empty, Cell::Number),
                record.reviews_count.map_or(Cell::Empty, Cell::count),
                record.sales_count.map_or(Cell::Empty, Cell::count),
                Cell::opt_text(record.seller.as_deref()),
                Cell::Currency(revenue),
            ],
        );
    }

    let average_rating = if rated == 0 {
        0.0
    } else {
        rating_sum / f64::from(rated)
    };

    let mut separator = vec![Cell::Empty; COLUMNS.len()];
    separator[0] = Cell::text("---");
    table.push(RowKind::Separator, separator);

    table.push(
        RowKind::Summary,
        vec![
            Cell::text("SUMMARY"),
            Cell::text(format!("{} Products", records.len())),
            Cell::Empty,
            Cell::Empty,
            Cell::Integer(total_stock),
            Cell::text(format!("{average_rating:.1}")),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Currency(total_revenue),
        ],
    );

    tracing::debug!(products = records.len(), %total_revenue, "built products report");
    Ok(table)
}
