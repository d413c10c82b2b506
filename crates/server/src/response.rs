//! The JSON response envelope shared by every endpoint.
//!
//! Shape: `{success, data?, message?, count?}`. Clients render `message`
//! verbatim; `count` accompanies list responses.

use serde::Serialize;

/// Standard API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Response payload, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message, rendered verbatim by the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of items in `data`, for list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    /// Success with a payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            count: None,
        }
    }

    /// Success with a message only (deletes, no-op adds).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            count: None,
        }
    }

    /// Failure with a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            count: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Success with a list payload and its count.
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            success: true,
            data: Some(items),
            message: None,
            count: Some(count),
        }
    }
}
