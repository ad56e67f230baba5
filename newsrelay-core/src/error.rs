//! Error types for the aggregator

use thiserror::Error;

/// Service-wide error type
///
/// Upstream variants carry the provider name ("Naver news API",
/// "Google News RSS", ...) so callers can report which hop failed without
/// inspecting message text. Messages that may embed upstream diagnostics
/// must be passed through [`crate::redact::redact`] before construction.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Malformed or missing caller-supplied field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing required process credentials
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream call exceeded the fixed timeout
    #[error("{provider} request timed out")]
    UpstreamTimeout { provider: String },

    /// Upstream rejected the configured credentials
    #[error("{provider} authentication failed, check the configured credentials")]
    UpstreamAuthFailed { provider: String },

    /// Upstream call quota exhausted
    #[error("{provider} rate limit exceeded, retry later")]
    UpstreamRateLimited { provider: String },

    /// Upstream refused the request outright (billing/permission case)
    #[error("{provider} forbade the request: {message}")]
    UpstreamForbidden { provider: String, message: String },

    /// Any other upstream HTTP or network failure
    #[error("{provider} call failed{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Upstream {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    /// Unexpected internal failure, details are logged server-side only
    #[error("Internal error")]
    Internal(String),
}

impl RelayError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        RelayError::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        RelayError::Config(msg.into())
    }

    pub fn timeout(provider: impl Into<String>) -> Self {
        RelayError::UpstreamTimeout {
            provider: provider.into(),
        }
    }

    pub fn auth_failed(provider: impl Into<String>) -> Self {
        RelayError::UpstreamAuthFailed {
            provider: provider.into(),
        }
    }

    pub fn rate_limited(provider: impl Into<String>) -> Self {
        RelayError::UpstreamRateLimited {
            provider: provider.into(),
        }
    }

    pub fn forbidden(provider: impl Into<String>, message: impl Into<String>) -> Self {
        RelayError::UpstreamForbidden {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn upstream(
        provider: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        RelayError::Upstream {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        RelayError::Internal(msg.into())
    }

    /// HTTP status class for the hosting request layer
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::InvalidInput(_) => 400,
            RelayError::Config(_) => 500,
            RelayError::UpstreamTimeout { .. } => 504,
            RelayError::UpstreamAuthFailed { .. } => 401,
            RelayError::UpstreamRateLimited { .. } => 429,
            RelayError::UpstreamForbidden { .. } => 403,
            RelayError::Upstream { .. } => 500,
            RelayError::Internal(_) => 500,
        }
    }
}

/// Result type alias for aggregator operations
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::invalid_input("x").status_code(), 400);
        assert_eq!(RelayError::timeout("Naver news API").status_code(), 504);
        assert_eq!(RelayError::auth_failed("Naver news API").status_code(), 401);
        assert_eq!(
            RelayError::rate_limited("Naver news API").status_code(),
            429
        );
        assert_eq!(
            RelayError::forbidden("Google Custom Search", "billing").status_code(),
            403
        );
        assert_eq!(
            RelayError::upstream("Naver news API", Some(502), "bad gateway").status_code(),
            500
        );
    }

    #[test]
    fn test_upstream_display_includes_status() {
        let err = RelayError::upstream("Naver news API", Some(503), "unavailable");
        assert_eq!(
            err.to_string(),
            "Naver news API call failed (status 503): unavailable"
        );

        let err = RelayError::upstream("Naver news API", None, "connection reset");
        assert_eq!(err.to_string(), "Naver news API call failed: connection reset");
    }

    #[test]
    fn test_internal_display_is_generic() {
        let err = RelayError::internal("stack trace with secrets");
        assert_eq!(err.to_string(), "Internal error");
    }
}
