//! Filter & sort pipeline behind the shop listing.
//!
//! Stages run in a fixed order, each narrowing the output of the previous one:
//! search, category, store, price, then sort. The source slice is never
//! modified; the result borrows from it.

use crate::criteria::{CategoryFilter, Criteria, PriceRange, SortMode, StoreFilter};
use crate::product::Product;
use crate::scoring::rank_by_score;

/// Run every stage of the pipeline over `products`.
///
/// Deterministic: the same products and criteria always produce the same
/// order. An empty result is a valid outcome, not an error.
#[must_use]
pub fn apply_criteria<'a>(products: &'a [Product], criteria: &Criteria) -> Vec<&'a Product> {
    let mut result: Vec<&'a Product> = products.iter().collect();

    if !criteria.search.is_empty() {
        let needle = criteria.search.to_lowercase();
        result.retain(|p| matches_search(p, &needle));
    }

    if let CategoryFilter::Named(category) = &criteria.category {
        result.retain(|p| p.category_name.as_deref() == Some(category.as_str()));
    }

    match &criteria.store {
        StoreFilter::All => {}
        StoreFilter::Platform => result.retain(|p| p.is_platform_owned()),
        StoreFilter::Seller(name) => {
            result.retain(|p| p.seller_name.as_deref() == Some(name.as_str()));
        }
    }

    if let Some(range) = &criteria.price {
        result.retain(|p| in_price_range(p, range));
    }

    let sorted = sort_products(result, criteria.sort);

    tracing::debug!(
        source = products.len(),
        matched = sorted.len(),
        sort = %criteria.sort,
        "applied shop criteria"
    );

    sorted
}

/// `needle` must already be lowercased.
fn matches_search(product: &Product, needle: &str) -> bool {
    product.product_name.to_lowercase().contains(needle)
}

fn in_price_range(product: &Product, range: &PriceRange) -> bool {
    range.contains(product.price)
}

/// Order an already-filtered list. All comparators are stable sorts.
fn sort_products(mut products: Vec<&Product>, mode: SortMode) -> Vec<&Product> {
    match mode {
        SortMode::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortMode::Rating => {
            products.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
        }
        SortMode::Reviews => {
            products.sort_by_key(|p| std::cmp::Reverse(p.reviews_or_zero()));
        }
        SortMode::Ranking => return rank_by_score(products),
    }
    products
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
