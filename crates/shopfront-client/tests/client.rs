//! Integration tests for `ShopClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shopfront_client::{ClientError, ShopClient};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ShopClient {
    ShopClient::with_base_url(&format!("{base_url}/api"), 5)
        .expect("client construction should not fail")
}

fn product_json(asin: &str, price: f64) -> serde_json::Value {
    serde_json::json!({
        "asin": asin,
        "productName": format!("Product {asin}"),
        "price": price,
        "rating": 4.5,
        "reviewsCount": 10,
        "salesCount": 3,
        "ranking": 12,
        "categoryName": "Books",
        "sellerId": null,
        "sellerName": null,
        "stockQuantity": 8
    })
}

fn page_json(items: Vec<serde_json::Value>, number: u32, total_pages: u32) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "message": "Products retrieved",
        "data": {
            "content": items,
            "totalElements": 3,
            "totalPages": total_pages,
            "size": 2,
            "number": number
        }
    })
}

#[tokio::test]
async fn list_products_sends_ranking_query_and_decodes_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "0"))
        .and(query_param("size", "2"))
        .and(query_param("sortBy", "ranking"))
        .and(query_param("direction", "asc"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![product_json("A1", 19.99), product_json("A2", 5.0)],
            0,
            2,
        )))
        .mount(&server)
        .await;

    let page = test_client(&server.uri())
        .list_products(0, 2)
        .await
        .expect("should decode page");

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].asin, "A1");
    assert_eq!(page.content[0].price, Decimal::new(1999, 2));
    assert!(page.content[0].is_platform_owned());
    assert!(!page.is_last());
}

#[tokio::test]
async fn fetch_catalog_walks_every_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![product_json("A1", 1.0), product_json("A2", 2.0)],
            0,
            2,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![product_json("A3", 3.0)],
            1,
            2,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .fetch_catalog(2)
        .await
        .expect("should fetch all pages");

    let asins: Vec<&str> = products.iter().map(|p| p.asin.as_str()).collect();
    assert_eq!(asins, vec!["A1", "A2", "A3"]);
}

#[tokio::test]
async fn bearer_token_is_attached_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analyst/reports/export/sellers"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Sellers data exported",
            "data": [{
                "rank": 1,
                "sellerId": 4,
                "sellerName": "Ann",
                "storeName": "Ann's Books",
                "totalRevenue": 1200.5,
                "productsSold": 30,
                "totalOrders": 12
            }]
        })))
        .mount(&server)
        .await;

    let sellers = test_client(&server.uri())
        .with_token("tok-123")
        .export_sellers()
        .await
        .expect("should decode sellers");

    assert_eq!(sellers.len(), 1);
    assert_eq!(sellers[0].seller_name.as_deref(), Some("Ann"));
    assert_eq!(sellers[0].total_revenue, Some(Decimal::new(12005, 1)));
}

#[tokio::test]
async fn export_sales_passes_date_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analyst/reports/export/sales"))
        .and(query_param("startDate", "2024-03-01"))
        .and(query_param("endDate", "2024-03-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Sales data exported",
            "data": [{
                "orderNumber": "ORD-9",
                "date": "2024-03-04",
                "customerName": "Bo",
                "customerEmail": "bo@example.com",
                "totalAmount": 99.9,
                "totalItems": 2,
                "status": "CONFIRMED"
            }]
        })))
        .mount(&server)
        .await;

    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let sales = test_client(&server.uri())
        .export_sales(start, end)
        .await
        .expect("should decode sales");

    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].order_number, "ORD-9");
    assert_eq!(sales[0].total_items, Some(2));
}

#[tokio::test]
async fn failure_envelope_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analyst/reports/export/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "Access denied",
            "data": null
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .export_products()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api(ref m) if m == "Access denied"), "got: {err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/top/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).top_products(5).await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/B07"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/B07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "ok",
            "data": product_json("B07", 12.0)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = test_client(&server.uri())
        .with_retries(3, 0)
        .get_product("B07")
        .await
        .expect("should succeed after retries");
    assert_eq!(product.asin, "B07");
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .with_retries(3, 0)
        .get_product("missing")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)), "got: {err:?}");
}
