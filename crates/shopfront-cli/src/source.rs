//! Where command input comes from: a local JSON file or the backend API.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use shopfront_client::ShopClient;
use shopfront_core::{AppConfig, Product};

/// Read a JSON array of `T` from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold an array of `T`.
pub(crate) fn read_json_array<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows: Vec<T> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded rows from file");
    Ok(rows)
}

/// Load the catalog from `file`, or fetch every page from the API.
///
/// # Errors
///
/// Returns an error if the file is unreadable or the API request fails.
pub(crate) async fn load_products(
    file: Option<&Path>,
    config: &AppConfig,
) -> anyhow::Result<Vec<Product>> {
    if let Some(path) = file {
        return read_json_array(path);
    }
    let client = ShopClient::from_config(config).context("failed to build API client")?;
    client
        .fetch_catalog(config.page_size)
        .await
        .with_context(|| format!("failed to fetch catalog from {}", config.api_url))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_product_array_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"asin": "A1", "productName": "Lamp", "price": 12.5, "rating": null,
                "reviewsCount": null, "salesCount": null, "ranking": null,
                "categoryName": null, "sellerId": null, "sellerName": null,
                "stockQuantity": 3}}]"#
        )
        .unwrap();

        let products: Vec<Product> = read_json_array(file.path()).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "Lamp");
    }

    #[test]
    fn unpriced_product_does_not_reject_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"asin": "A1", "productName": "Lamp", "price": 10}},
                {{"asin": "A2", "productName": "Mystery box", "price": null}},
                {{"asin": "A3", "productName": "Sample"}}]"#
        )
        .unwrap();

        let products: Vec<Product> = read_json_array(file.path()).unwrap();
        assert_eq!(products.len(), 3);
        assert!(products[1].price.is_zero());
        assert!(products[2].price.is_zero());
    }

    #[test]
    fn rejects_non_array_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"asin": "A1"}}"#).unwrap();
        assert!(read_json_array::<Product>(file.path()).is_err());
    }
}
