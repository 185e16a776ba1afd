// src/api/error.rs
use std::path::PathBuf;
use serde::Deserialize;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Analysis failed";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        detail: Option<String>,
    },

    #[error("Invalid response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error payload the backend returns alongside non-2xx responses.
/// `detail` is only honoured when it is a plain string; validation errors
/// carry a structured list there instead.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            detail: detail_from_body(body),
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message for the error banner: the server's own detail if it sent one,
    /// then the transport-level message, then a generic fallback.
    pub fn user_message(&self) -> String {
        user_message(self.detail(), &self.to_string())
    }
}

pub fn user_message(detail: Option<&str>, transport: &str) -> String {
    if let Some(detail) = detail.map(str::trim).filter(|d| !d.is_empty()) {
        return detail.to_string();
    }
    let transport = transport.trim();
    if !transport.is_empty() {
        return transport.to_string();
    }
    GENERIC_FAILURE.to_string()
}

pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.detail
        .as_ref()
        .and_then(|v| v.as_str())
        .or_else(|| parsed.error.as_ref().and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_wins_over_status_message() {
        let err = ApiError::from_status(400, r#"{"detail":"bad file"}"#);
        assert_eq!(err.user_message(), "bad file");
    }

    #[test]
    fn test_status_message_when_body_has_no_detail() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(err.user_message(), "Request failed with status code 500");

        // structured validation errors are not shown verbatim
        let err = ApiError::from_status(422, r#"{"detail":[{"loc":["body","logfile"],"msg":"field required"}]}"#);
        assert_eq!(err.user_message(), "Request failed with status code 422");
    }

    #[test]
    fn test_error_field_used_when_detail_missing() {
        let err = ApiError::from_status(404, r#"{"error":"Analysis not found"}"#);
        assert_eq!(err.user_message(), "Analysis not found");
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(user_message(None, ""), GENERIC_FAILURE);
        assert_eq!(user_message(Some("  "), " "), GENERIC_FAILURE);
        assert_eq!(user_message(None, "connection refused"), "connection refused");
    }
}
