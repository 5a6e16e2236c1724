use super::*;

fn test_client(base_url: &str) -> ShopClient {
    ShopClient::with_base_url(base_url, 5).expect("client construction should not fail")
}

#[test]
fn build_url_appends_to_api_prefix() {
    let client = test_client("http://localhost:8080/api");
    let url = client
        .build_url("products", &[("page", "0"), ("size", "50")])
        .unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/api/products?page=0&size=50");
}

#[test]
fn build_url_tolerates_trailing_and_leading_slashes() {
    let client = test_client("http://localhost:8080/api/");
    let url = client.build_url("/analyst/reports/export/sellers", &[]).unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/api/analyst/reports/export/sellers"
    );
}

#[test]
fn build_url_encodes_query_values() {
    let client = test_client("http://localhost:8080/api");
    let url = client.build_url("products", &[("q", "tom & jerry")]).unwrap();
    assert!(
        url.as_str().contains("tom+%26+jerry") || url.as_str().contains("tom%20%26%20jerry"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn rejects_unparseable_base_url() {
    let err = ShopClient::with_base_url("not a url", 5).unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }), "got: {err:?}");
}

#[test]
fn rejects_non_http_scheme() {
    let err = ShopClient::with_base_url("ftp://files.example.com", 5).unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }), "got: {err:?}");
}

#[test]
fn debug_output_redacts_token() {
    let client = test_client("http://localhost:8080/api").with_token("very-secret");
    let debug = format!("{client:?}");
    assert!(!debug.contains("very-secret"));
    assert!(debug.contains("[redacted]"));
}
