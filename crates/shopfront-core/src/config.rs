use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Does not read `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// configuration pointed at a local backend.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SHOPFRONT_ENV", "development"));
    let log_level = or_default("SHOPFRONT_LOG_LEVEL", "info");

    let api_url = or_default("SHOPFRONT_API_URL", "http://localhost:8080/api");
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(invalid(
            "SHOPFRONT_API_URL",
            format!("expected an http(s) URL, got '{api_url}'"),
        ));
    }
    let api_url = api_url.trim_end_matches('/').to_string();

    let api_token = lookup("SHOPFRONT_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    let store_path = PathBuf::from(or_default(
        "SHOPFRONT_STORE_PATH",
        "./config/storefront.yaml",
    ));

    let request_timeout_secs = parse_u64("SHOPFRONT_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("SHOPFRONT_USER_AGENT", "shopfront/0.1 (storefront-cli)");
    let max_retries = parse_u32("SHOPFRONT_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("SHOPFRONT_RETRY_BACKOFF_BASE_MS", "500")?;

    let page_size = parse_u32("SHOPFRONT_PAGE_SIZE", "1000")?;
    if page_size == 0 {
        return Err(invalid("SHOPFRONT_PAGE_SIZE", "must be at least 1".to_string()));
    }

    Ok(AppConfig {
        env,
        log_level,
        api_url,
        api_token,
        store_path,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        page_size,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
