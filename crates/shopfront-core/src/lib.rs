pub mod app_config;
pub mod catalog;
pub mod config;
pub mod criteria;
pub mod error;
pub mod facets;
pub mod pipeline;
pub mod product;
pub mod scoring;
pub mod session;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Catalog, Listing, ListingEntry};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{CategoryFilter, Criteria, PriceRange, SortMode, StoreFilter};
pub use error::{CartError, ConfigError, CriteriaError};
pub use facets::{StoreOption, ALL};
pub use pipeline::apply_criteria;
pub use product::{Product, StockStatus};
pub use scoring::{product_score, rank_by_score, ranking_bonus, RankIndex};
pub use session::{Cart, CartItem, Role, SessionUser, ShopSession};
pub use store::{load_store_settings, load_store_settings_or_default, PricePreset, StoreSettings};
