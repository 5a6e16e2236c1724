use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::criteria::{PriceRange, PLATFORM_SENTINEL};
use crate::facets::ALL;
use crate::ConfigError;

pub const DEFAULT_PLATFORM_STORE: &str = "MouadVision";
pub const DEFAULT_TOP_BADGE_LIMIT: usize = 10;
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// One entry of the price dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricePreset {
    pub label: String,
    pub range: PriceRange,
}

/// Storefront presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Display name of the platform's own store.
    pub platform_store: String,
    /// Listings ranked at or above this position get a "Top N" badge.
    pub top_badge_limit: usize,
    /// Stock at or below this count (and above zero) is shown as low.
    pub low_stock_threshold: i64,
    pub price_ranges: Vec<PricePreset>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let presets = [
            ("Under $25", "0-25"),
            ("$25 - $50", "25-50"),
            ("$50 - $100", "50-100"),
            ("$100 - $500", "100-500"),
            ("$500 - $1000", "500-1000"),
            ("$1000+", "1000-"),
        ];
        Self {
            platform_store: DEFAULT_PLATFORM_STORE.to_string(),
            top_badge_limit: DEFAULT_TOP_BADGE_LIMIT,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            price_ranges: presets
                .iter()
                .filter_map(|(label, raw)| {
                    raw.parse().ok().map(|range| PricePreset {
                        label: (*label).to_string(),
                        range,
                    })
                })
                .collect(),
        }
    }
}

impl StoreSettings {
    /// Find a preset by its label.
    #[must_use]
    pub fn preset(&self, label: &str) -> Option<&PricePreset> {
        self.price_ranges.iter().find(|p| p.label == label)
    }
}

#[derive(Debug, Deserialize)]
struct StoreFile {
    platform_store: Option<String>,
    top_badge_limit: Option<usize>,
    low_stock_threshold: Option<i64>,
    #[serde(default)]
    price_ranges: Vec<RawPreset>,
}

#[derive(Debug, Deserialize)]
struct RawPreset {
    label: String,
    range: String,
}

/// Load and validate store settings from a YAML file.
///
/// Keys missing from the file keep their defaults. An empty `price_ranges`
/// list keeps the default presets.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_store_settings(path: &Path) -> Result<StoreSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoreFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_store_settings(&content)
}

/// Like [`load_store_settings`], but a missing file yields the defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but is unreadable or invalid.
pub fn load_store_settings_or_default(path: &Path) -> Result<StoreSettings, ConfigError> {
    if path.exists() {
        load_store_settings(path)
    } else {
        tracing::debug!(path = %path.display(), "store settings not found; using defaults");
        Ok(StoreSettings::default())
    }
}

fn parse_store_settings(content: &str) -> Result<StoreSettings, ConfigError> {
    let file: StoreFile = serde_yaml::from_str(content)?;
    let defaults = StoreSettings::default();

    let price_ranges = if file.price_ranges.is_empty() {
        defaults.price_ranges
    } else {
        file.price_ranges
            .into_iter()
            .map(|raw| {
                let range = raw.range.parse::<PriceRange>().map_err(|e| {
                    ConfigError::Validation(format!("price range '{}': {e}", raw.label))
                })?;
                Ok(PricePreset {
                    label: raw.label,
                    range,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?
    };

    let settings = StoreSettings {
        platform_store: file.platform_store.unwrap_or(defaults.platform_store),
        top_badge_limit: file.top_badge_limit.unwrap_or(defaults.top_badge_limit),
        low_stock_threshold: file
            .low_stock_threshold
            .unwrap_or(defaults.low_stock_threshold),
        price_ranges,
    };
    validate_store_settings(&settings)?;
    Ok(settings)
}

fn validate_store_settings(settings: &StoreSettings) -> Result<(), ConfigError> {
    let platform = settings.platform_store.trim();
    if platform.is_empty() {
        return Err(ConfigError::Validation(
            "platform_store must be non-empty".to_string(),
        ));
    }
    if platform.eq_ignore_ascii_case(ALL) || platform.eq_ignore_ascii_case(PLATFORM_SENTINEL) {
        return Err(ConfigError::Validation(format!(
            "platform_store '{platform}' collides with a reserved store filter value"
        )));
    }

    if settings.top_badge_limit == 0 {
        return Err(ConfigError::Validation(
            "top_badge_limit must be at least 1".to_string(),
        ));
    }

    if settings.low_stock_threshold < 0 {
        return Err(ConfigError::Validation(
            "low_stock_threshold must not be negative".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for preset in &settings.price_ranges {
        if preset.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "price range label must be non-empty".to_string(),
            ));
        }
        if !seen.insert(preset.label.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate price range label: '{}'",
                preset.label
            )));
        }
    }

    Ok(())
}
