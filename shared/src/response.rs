//! API Response types
//!
//! Envelope structure the storefront backend wraps payloads in

use serde::{Deserialize, Serialize};

/// Status value the backend sends on success
pub const API_STATUS_SUCCESS: &str = "success";

/// Response envelope used by most storefront endpoints
///
/// ```json
/// {
///     "status": "success",
///     "message": "Cart item added",
///     "data": { ... }
/// }
/// ```
///
/// A few endpoints (coupon check among them) skip the envelope and send
/// the payload as the response body itself, so every field is optional
/// and callers fall back to parsing the bare body when `data` is absent.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Outcome marker ("success" or an error label)
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            status: Some(API_STATUS_SUCCESS.to_string()),
            message: None,
            data: Some(data),
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: Some(API_STATUS_SUCCESS.to_string()),
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            message: Some(message.into()),
            data: None,
        }
    }

    /// Whether the backend marked this response as successful
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(API_STATUS_SUCCESS)
    }

    /// Consume the envelope, yielding the payload if present
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
