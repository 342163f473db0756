//! Shared HTTP utilities for the sellers service workspace.
//!
//! Provides the response envelope every endpoint answers with and small,
//! framework-agnostic request helpers.

use serde::Serialize;

// ============================================================================
// Response Envelope
// ============================================================================

/// Message used for every successful response.
pub const MSG_SUCCESS: &str = "success";
/// Message used when the request cannot be decoded.
pub const MSG_BAD_REQUEST: &str = "bad request";
/// Message used for failures that are not the client's fault.
pub const MSG_INTERNAL_ERROR: &str = "internal error";

/// Uniform JSON response wrapper.
///
/// Serializes as `{"message": "...", "data": <T | null>, "error": bool}`;
/// `data` is always present, `null` on failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: Option<T>,
    pub error: bool,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            message: MSG_SUCCESS.to_string(),
            data: Some(data),
            error: false,
        }
    }

    /// Failed response with the given message and no data.
    pub fn failure(message: &str) -> Self {
        Self {
            message: message.to_string(),
            data: None,
            error: true,
        }
    }

    pub fn bad_request() -> Self {
        Self::failure(MSG_BAD_REQUEST)
    }

    pub fn internal_error() -> Self {
        Self::failure(MSG_INTERNAL_ERROR)
    }
}

// ============================================================================
// Request Helpers
// ============================================================================

/// Return the last segment of a URL path, ignoring any query string.
///
/// Returns `None` when the path ends with `/` or is empty, i.e. when the
/// request carries no trailing parameter.
pub fn path_last_param(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit('/').next() {
        Some(seg) if !seg.is_empty() => Some(seg),
        _ => None,
    }
}
