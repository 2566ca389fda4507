//! API Error Types
//!
//! One error type for every call into the counseling API, shared by the
//! native client and the browser front end. Views never retry; they turn the
//! error into a single user-facing line with [`ApiError::user_message`].

use serde::Deserialize;
use thiserror::Error;

/// Message shown when a call needs a session and there is none
pub const LOGIN_REQUIRED: &str = "Login required.";

// Fallbacks shown when the server gives no message of its own
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const FETCH_COUNSELORS_FAILED: &str = "Failed to fetch counselors.";
pub const FETCH_APPOINTMENTS_FAILED: &str = "Failed to fetch appointments.";
pub const CANCEL_FAILED: &str = "Failed to cancel appointment.";
pub const CANCEL_FAILED_RETRY: &str = "Failed to cancel appointment. Try again.";
pub const BOOKING_FAILED: &str = "Failed to book appointment. Please try again.";
pub const PAYMENT_FAILED: &str = "Payment failed. Please try again.";
pub const LOGIN_TO_VIEW_APPOINTMENTS: &str = "Please login to view appointments.";

/// Error body returned by the API. Auth and booking endpoints use `error`,
/// the checkout endpoint uses `message`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, tolerating empty or non-JSON responses
    pub fn from_text(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// First non-empty message the server sent
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.message.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

/// Errors from API calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("API error {status}: {}", .body.as_ref().and_then(|b| b.text()).unwrap_or("no details"))]
    Status {
        status: u16,
        body: Option<ApiErrorBody>,
    },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// No stored session for an authenticated call
    #[error("Login required")]
    MissingSession,

    /// Server response was well-formed but unusable (e.g. empty token)
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    /// Build a status error from a raw response body
    pub fn from_status(status: u16, text: &str) -> Self {
        ApiError::Status {
            status,
            body: ApiErrorBody::from_text(text),
        }
    }

    /// The line to show the user: the server's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { body: Some(body), .. } => {
                body.text().unwrap_or(fallback).to_string()
            }
            ApiError::MissingSession => LOGIN_REQUIRED.to_string(),
            ApiError::Invalid(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_error_field() {
        let err = ApiError::from_status(400, r#"{"error":"Email already registered"}"#);
        assert_eq!(err.user_message("Registration failed."), "Email already registered");
    }

    #[test]
    fn test_user_message_uses_message_field() {
        let err = ApiError::from_status(500, r#"{"message":"Card declined"}"#);
        assert_eq!(err.user_message("Payment failed."), "Card declined");
    }

    #[test]
    fn test_user_message_falls_back() {
        let html = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(html.user_message("Failed to fetch counselors."), "Failed to fetch counselors.");

        let blank = ApiError::from_status(400, r#"{"error":"  "}"#);
        assert_eq!(blank.user_message("fallback"), "fallback");

        let network = ApiError::Network("connection refused".into());
        assert_eq!(network.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_missing_session_and_invalid() {
        assert_eq!(ApiError::MissingSession.user_message("x"), LOGIN_REQUIRED);
        assert_eq!(
            ApiError::Invalid("Invalid token received from server.".into()).user_message("x"),
            "Invalid token received from server."
        );
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(!ApiError::from_status(404, "").is_unauthorized());
    }
}
