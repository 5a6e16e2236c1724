//! Distinct values that populate the category and store dropdowns.

use std::collections::HashSet;

use crate::product::Product;

/// Dropdown sentinel meaning "do not filter on this field".
pub const ALL: &str = "all";

/// One entry in the store dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOption {
    /// `None` for the `all` and platform entries.
    pub seller_id: Option<i64>,
    pub name: String,
}

/// `"all"` followed by each distinct, non-empty category name in first-seen order.
///
/// Products without a category are left out of the list but stay visible
/// under the `all` filter.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = vec![ALL.to_string()];
    for name in products
        .iter()
        .filter_map(|p| p.category_name.as_deref())
        .filter(|name| !name.is_empty())
    {
        if seen.insert(name) {
            values.push(name.to_string());
        }
    }
    values
}

/// `all`, the platform store, then each distinct third-party seller.
///
/// Sellers are deduplicated by name and keep the id of their first listing.
/// Listings missing either the seller id or the seller name are skipped.
#[must_use]
pub fn stores(products: &[Product], platform_label: &str) -> Vec<StoreOption> {
    let mut options = vec![
        StoreOption {
            seller_id: None,
            name: ALL.to_string(),
        },
        StoreOption {
            seller_id: None,
            name: platform_label.to_string(),
        },
    ];

    let mut seen = HashSet::new();
    for product in products {
        let (Some(seller_id), Some(name)) = (product.seller_id, product.seller_name.as_deref())
        else {
            continue;
        };
        if seen.insert(name) {
            options.push(StoreOption {
                seller_id: Some(seller_id),
                name: name.to_string(),
            });
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::fixtures::product;

    fn in_category(asin: &str, category: Option<&str>) -> Product {
        let mut p = product(asin, asin, 10);
        p.category_name = category.map(str::to_string);
        p
    }

    fn sold_by(asin: &str, seller: Option<(i64, &str)>) -> Product {
        let mut p = product(asin, asin, 10);
        if let Some((id, name)) = seller {
            p.seller_id = Some(id);
            p.seller_name = Some(name.to_string());
        }
        p
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let products = vec![
            in_category("1", Some("Books")),
            in_category("2", Some("Electronics")),
            in_category("3", Some("Books")),
            in_category("4", Some("Toys")),
        ];
        assert_eq!(
            categories(&products),
            vec!["all", "Books", "Electronics", "Toys"]
        );
    }

    #[test]
    fn missing_and_empty_categories_are_left_out() {
        let products = vec![
            in_category("1", None),
            in_category("2", Some("")),
            in_category("3", Some("Garden")),
        ];
        assert_eq!(categories(&products), vec!["all", "Garden"]);
    }

    #[test]
    fn all_null_categories_yield_only_the_all_sentinel() {
        let products = vec![in_category("1", None), in_category("2", None)];
        assert_eq!(categories(&products), vec!["all"]);
    }

    #[test]
    fn stores_lead_with_all_and_platform() {
        let options = stores(&[], "MouadVision");
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["all", "MouadVision"]);
        assert!(options.iter().all(|o| o.seller_id.is_none()));
    }

    #[test]
    fn stores_dedupe_sellers_by_name() {
        let products = vec![
            sold_by("1", Some((7, "Gadget Hub"))),
            sold_by("2", None),
            sold_by("3", Some((9, "Book Nook"))),
            sold_by("4", Some((7, "Gadget Hub"))),
        ];
        let options = stores(&products, "MouadVision");
        assert_eq!(options.len(), 4);
        assert_eq!(
            options[2],
            StoreOption {
                seller_id: Some(7),
                name: "Gadget Hub".to_string()
            }
        );
        assert_eq!(options[3].name, "Book Nook");
    }

    #[test]
    fn stores_skip_listings_without_seller_name() {
        let mut p = product("1", "Orphan", 10);
        p.seller_id = Some(3);
        let options = stores(&[p], "MouadVision");
        assert_eq!(options.len(), 2);
    }
}
