use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog listing as returned by the storefront backend.
///
/// Numeric fields the backend may omit are `Option`s; the `*_or_zero`
/// accessors give the value every ranking and filtering step works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub asin: String,
    pub product_name: String,
    /// A null or missing price decodes as zero.
    #[serde(default, deserialize_with = "price_or_zero")]
    pub price: Decimal,
    /// Average star rating in `[0, 5]`.
    pub rating: Option<f64>,
    pub reviews_count: Option<u64>,
    pub sales_count: Option<u64>,
    /// Upstream popularity rank; `1` is the most popular. `None` means unranked.
    pub ranking: Option<i64>,
    pub category_name: Option<String>,
    /// Third-party seller. `None` marks a platform-owned listing.
    pub seller_id: Option<i64>,
    pub seller_name: Option<String>,
    pub stock_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bestseller: Option<bool>,
}

fn price_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

/// Availability bucket used for the out-of-stock overlay and low-stock badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    /// Positive stock at or below the configured threshold; carries the units left.
    Low(i64),
    InStock,
}

impl Product {
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    #[must_use]
    pub fn reviews_or_zero(&self) -> u64 {
        self.reviews_count.unwrap_or(0)
    }

    #[must_use]
    pub fn sales_or_zero(&self) -> u64 {
        self.sales_count.unwrap_or(0)
    }

    #[must_use]
    pub fn stock_or_zero(&self) -> i64 {
        self.stock_quantity.unwrap_or(0)
    }

    /// Returns `true` when no third-party seller is attached to the listing.
    #[must_use]
    pub fn is_platform_owned(&self) -> bool {
        self.seller_id.is_none()
    }

    #[must_use]
    pub fn stock_status(&self, low_stock_threshold: i64) -> StockStatus {
        let stock = self.stock_or_zero();
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= low_stock_threshold {
            StockStatus::Low(stock)
        } else {
            StockStatus::InStock
        }
    }
}
