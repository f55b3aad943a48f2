//! Error types for the OPNsense Unbound client.

use thiserror::Error;

/// Result alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No record matched the lookup.
    #[error("not found: {name}")]
    NotFound { name: String },

    /// A lookup expected to be unique matched more than one record.
    #[error("too many found: {name}")]
    TooManyFound { name: String },

    /// The appliance answered with a non-success status code.
    #[error(
        "server returned {status}: {message}{}",
        .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
    )]
    Server {
        status: u16,
        message: String,
        /// Transport-level error hit while reading the error body, if any.
        detail: Option<String>,
    },

    /// The appliance accepted the request but refused to save the record.
    #[error("{result}: {}", render_fields(.fields))]
    Validation {
        result: String,
        fields: Vec<(String, String)>,
    },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unrecognized {kind}: {value}")]
    InvalidEndpoint { kind: &'static str, value: String },

    #[error("host override has no identifier")]
    MissingIdentifier,

    #[error("invalid connection config: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn too_many_found(name: impl Into<String>) -> Self {
        Self::TooManyFound { name: name.into() }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_too_many_found(&self) -> bool {
        matches!(self, Self::TooManyFound { .. })
    }
}

fn render_fields(fields: &[(String, String)]) -> String {
    if fields.is_empty() {
        return "no details given".to_string();
    }
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_without_detail_has_no_trailing_segment() {
        let err = ApiError::Server {
            status: 500,
            message: "boom".to_string(),
            detail: None,
        };
        assert_eq!(err.to_string(), "server returned 500: boom");
    }

    #[test]
    fn test_server_error_with_detail() {
        let err = ApiError::Server {
            status: 502,
            message: "Bad Gateway".to_string(),
            detail: Some("connection reset".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "server returned 502: Bad Gateway: connection reset"
        );
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ApiError::Validation {
            result: "failed".to_string(),
            fields: vec![
                ("host.hostname".to_string(), "required".to_string()),
                ("host.server".to_string(), "not an address".to_string()),
            ],
        };
        let text = err.to_string();
        assert!(text.starts_with("failed: "));
        assert!(text.contains("host.hostname: required"));
        assert!(text.contains("host.server: not an address"));
    }

    #[test]
    fn test_kind_helpers() {
        assert!(ApiError::not_found("hostentry").is_not_found());
        assert!(!ApiError::not_found("hostentry").is_too_many_found());
        assert!(ApiError::too_many_found("printer.lan").is_too_many_found());
        assert!(!ApiError::MissingIdentifier.is_not_found());
    }
}
