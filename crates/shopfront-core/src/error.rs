use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read store settings at {path}: {source}")]
    StoreFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse store settings: {0}")]
    StoreFileParse(#[from] serde_yaml::Error),

    #[error("invalid store settings: {0}")]
    Validation(String),
}

/// Errors raised while parsing shop filter criteria from their string form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("invalid price range \"{raw}\": {reason}")]
    InvalidPriceRange { raw: String, reason: String },

    #[error("unknown sort mode \"{0}\"; expected ranking, price-low, price-high, rating or reviews")]
    UnknownSortMode(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("only {available} of {asin} in stock; cart would hold {requested}")]
    InsufficientStock {
        asin: String,
        requested: u64,
        available: i64,
    },

    #[error("{0} is not in the cart")]
    NotInCart(String),
}
