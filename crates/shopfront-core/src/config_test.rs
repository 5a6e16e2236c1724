use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn assert_invalid(map: &HashMap<&str, &str>, expected_var: &str) {
    let result = build_app_config(lookup_from_map(map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_environment_variants() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn empty_environment_uses_defaults() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_url, "http://localhost:8080/api");
    assert!(cfg.api_token.is_none());
    assert_eq!(
        cfg.store_path,
        std::path::PathBuf::from("./config/storefront.yaml")
    );
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.user_agent, "shopfront/0.1 (storefront-cli)");
    assert_eq!(cfg.max_retries, 3);
    assert_eq!(cfg.retry_backoff_base_ms, 500);
    assert_eq!(cfg.page_size, 1000);
}

#[test]
fn overrides_are_applied() {
    let mut map = HashMap::new();
    map.insert("SHOPFRONT_ENV", "production");
    map.insert("SHOPFRONT_API_URL", "https://shop.example.com/api/");
    map.insert("SHOPFRONT_API_TOKEN", "abc123");
    map.insert("SHOPFRONT_MAX_RETRIES", "5");
    map.insert("SHOPFRONT_PAGE_SIZE", "50");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.api_url, "https://shop.example.com/api");
    assert_eq!(cfg.api_token.as_deref(), Some("abc123"));
    assert_eq!(cfg.max_retries, 5);
    assert_eq!(cfg.page_size, 50);
}

#[test]
fn blank_token_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("SHOPFRONT_API_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_token.is_none());
}

#[test]
fn invalid_numbers_name_the_offending_var() {
    for var in [
        "SHOPFRONT_REQUEST_TIMEOUT_SECS",
        "SHOPFRONT_MAX_RETRIES",
        "SHOPFRONT_RETRY_BACKOFF_BASE_MS",
        "SHOPFRONT_PAGE_SIZE",
    ] {
        let mut map = HashMap::new();
        map.insert(var, "not-a-number");
        assert_invalid(&map, var);
    }
}

#[test]
fn zero_page_size_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHOPFRONT_PAGE_SIZE", "0");
    assert_invalid(&map, "SHOPFRONT_PAGE_SIZE");
}

#[test]
fn non_http_api_url_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHOPFRONT_API_URL", "ftp://files.example.com");
    assert_invalid(&map, "SHOPFRONT_API_URL");
}

#[test]
fn debug_output_redacts_api_token() {
    let mut map = HashMap::new();
    map.insert("SHOPFRONT_API_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("[redacted]"));
}
