//! Standardized API response types.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// When the error was produced, RFC 3339 in UTC.
    pub timestamp: String,

    /// The HTTP status code.
    pub status: u16,

    /// Reason phrase of the status, e.g. "Not Found".
    pub error: String,

    /// A human-readable explanation specific to this occurrence.
    pub message: String,

    /// Request path that failed.
    pub path: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status,
            error: error.into(),
            message: String::new(),
            path: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_message(message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized").with_message(message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(403, "Forbidden").with_message(message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_message(message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_message(message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(422, "Unprocessable Entity").with_message(message)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error").with_message("An unexpected error occurred")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_fields() {
        let error = ErrorResponse::not_found("Post with id 7 not found").with_path("/api/posts/7");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "Post with id 7 not found");
        assert_eq!(json["path"], "/api/posts/7");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_ok_response_omits_empty_message() {
        let json = serde_json::to_value(ApiResponse::ok(3)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 3);
        assert!(json.get("message").is_none());
    }
}
