//! The `{ status, message?, data? }` envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Outcome tag of an [`ApiResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response envelope.
///
/// `message` and `data` are omitted from the JSON when absent, so a bare
/// success serializes as `{"status":"success"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Success carrying a payload.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
        }
    }

    /// Success carrying a payload and a human-readable message.
    #[must_use]
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Application-level failure.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Whether the envelope reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

impl ApiResponse<()> {
    /// Bare success without message or payload.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_success_shape() {
        let json = serde_json::to_string(&ApiResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"success"}"#);
    }

    #[test]
    fn test_error_shape() {
        let json = serde_json::to_string(&ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(json, r#"{"status":"error","message":"nope"}"#);
    }

    #[test]
    fn test_empty_list_keeps_data() {
        let json = serde_json::to_string(&ApiResponse::success(Vec::<u8>::new())).unwrap();
        assert_eq!(json, r#"{"status":"success","data":[]}"#);
    }

    #[test]
    fn test_parses_without_optional_fields() {
        let parsed: ApiResponse<Vec<u8>> = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(!parsed.is_success());
        assert!(parsed.message.is_none());
        assert!(parsed.data.is_none());
    }
}
