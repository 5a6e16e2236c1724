pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::ShopClient;
pub use error::ClientError;
pub use types::{ApiResponse, PagedResponse};
