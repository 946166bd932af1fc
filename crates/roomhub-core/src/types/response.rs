//! Error body shared by every failed HTTP response.

use serde::{Deserialize, Serialize};

/// Body returned whenever a request fails.
///
/// The `error` code is stable and machine-readable; clients branch on it
/// rather than on the message text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Stable machine-readable code, e.g. `CONFLICT`.
    pub error: String,
    /// Human-readable message safe to show to the caller.
    pub message: String,
    /// Optional structured context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// Builds a body with no structured details.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }
}
