//! Shop filter and sort criteria, parsed from the same string values the
//! storefront's filter dropdowns submit (`"all"`, `"25-50"`, `"price-low"`, ...).

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::CriteriaError;
use crate::facets::ALL;

/// Store filter value that selects platform-owned listings when no platform
/// label has been configured.
pub const PLATFORM_SENTINEL: &str = "platform";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive match on `categoryName`.
    Named(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Self::All
        } else {
            Self::Named(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreFilter {
    #[default]
    All,
    /// Listings with no third-party seller.
    Platform,
    /// Listings whose `sellerName` equals the given name.
    Seller(String),
}

impl StoreFilter {
    /// Parse a store dropdown value. Both [`PLATFORM_SENTINEL`] and the
    /// configured platform store label select platform-owned listings.
    #[must_use]
    pub fn parse(raw: &str, platform_label: &str) -> Self {
        if raw == ALL {
            Self::All
        } else if raw == PLATFORM_SENTINEL || raw == platform_label {
            Self::Platform
        } else {
            Self::Seller(raw.to_string())
        }
    }
}

/// Inclusive price window. An absent `max` means open-ended (`price >= min`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Option<Decimal>,
}

impl PriceRange {
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        match self.max {
            Some(max) => price >= self.min && price <= max,
            None => price >= self.min,
        }
    }
}

impl FromStr for PriceRange {
    type Err = CriteriaError;

    /// Accepts `"min-max"` and `"min-"`. A maximum of `0` is read as
    /// open-ended, the same as an empty maximum.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CriteriaError::InvalidPriceRange {
            raw: raw.to_string(),
            reason: reason.to_string(),
        };

        let (min_raw, max_raw) = raw
            .split_once('-')
            .ok_or_else(|| invalid("expected \"min-max\" or \"min-\""))?;

        let min = min_raw
            .trim()
            .parse::<Decimal>()
            .map_err(|e| invalid(&format!("minimum is not a number: {e}")))?;
        if min.is_sign_negative() {
            return Err(invalid("minimum must not be negative"));
        }

        let max_raw = max_raw.trim();
        let max = if max_raw.is_empty() {
            None
        } else {
            let max = max_raw
                .parse::<Decimal>()
                .map_err(|e| invalid(&format!("maximum is not a number: {e}")))?;
            if max.is_sign_negative() {
                return Err(invalid("maximum must not be negative"));
            }
            Some(max).filter(|m| !m.is_zero())
        };

        Ok(Self { min, max })
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}-", self.min),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Descending desirability score.
    #[default]
    Ranking,
    PriceLow,
    PriceHigh,
    Rating,
    Reviews,
}

impl FromStr for SortMode {
    type Err = CriteriaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "ranking" => Ok(Self::Ranking),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "reviews" => Ok(Self::Reviews),
            other => Err(CriteriaError::UnknownSortMode(other.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranking => write!(f, "ranking"),
            Self::PriceLow => write!(f, "price-low"),
            Self::PriceHigh => write!(f, "price-high"),
            Self::Rating => write!(f, "rating"),
            Self::Reviews => write!(f, "reviews"),
        }
    }
}

/// Everything the shop page lets a buyer narrow or reorder by.
///
/// `Criteria::default()` filters nothing and sorts by ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Case-insensitive substring of `productName`. Empty means no filter.
    pub search: String,
    pub category: CategoryFilter,
    pub store: StoreFilter,
    /// `None` disables the price filter.
    pub price: Option<PriceRange>,
    pub sort: SortMode,
}

impl Criteria {
    /// Parse a price dropdown value, where `"all"` disables the filter.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::InvalidPriceRange`] for values that are
    /// neither `"all"` nor a well-formed range.
    pub fn parse_price(raw: &str) -> Result<Option<PriceRange>, CriteriaError> {
        if raw == ALL {
            Ok(None)
        } else {
            raw.parse().map(Some)
        }
    }

    /// Returns `true` when any filter other than search narrows the result.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.category != CategoryFilter::All
            || self.store != StoreFilter::All
            || self.price.is_some()
    }
}
