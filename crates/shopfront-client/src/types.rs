use serde::Deserialize;

use crate::error::ClientError;

/// Envelope every backend endpoint wraps its payload in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, turning a failure envelope into [`ClientError::Api`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] when `success` is false.
    /// - [`ClientError::MissingData`] when `data` is absent or null.
    pub fn into_result(self, context: &str) -> Result<T, ClientError> {
        if !self.success {
            return Err(ClientError::Api(
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ClientError::MissingData(context.to_string()))
    }
}

/// One page of a paginated listing. `number` is 0-based.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
}

impl<T> PagedResponse<T> {
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.content.is_empty() || self.number.saturating_add(1) >= self.total_pages
    }
}
