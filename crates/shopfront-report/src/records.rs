//! Row shapes returned by the analyst export endpoints.
//!
//! The backend omits or nulls fields freely, so everything except the row
//! identifier is optional. Builders treat a missing number as zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One confirmed or delivered order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub order_number: String,
    /// Order date or timestamp as sent by the backend (`2024-01-15` or ISO-8601).
    pub date: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub total_amount: Option<Decimal>,
    pub total_items: Option<u64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub asin: String,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub rating: Option<f64>,
    pub reviews_count: Option<u64>,
    pub sales_count: Option<u64>,
    pub stock_quantity: Option<i64>,
    pub seller: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerRecord {
    /// Position in the backend's revenue ranking, 1-based.
    pub rank: Option<u32>,
    pub seller_id: Option<i64>,
    pub seller_name: Option<String>,
    pub store_name: Option<String>,
    pub total_revenue: Option<Decimal>,
    pub products_sold: Option<u64>,
    pub total_orders: Option<u64>,
}
