//! API route definitions

mod health;
mod keywords;
mod news;
mod research;

use axum::http::StatusCode;
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;

use newsrelay_core::{redact, RelayError};

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(keywords::routes())
        .merge(news::routes())
        .merge(research::routes())
}

/// Error body shared by all endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a pipeline error onto an HTTP response.
///
/// Internal errors never expose their detail; everything else surfaces its
/// (already redacted) display text. The full error is logged server-side.
pub fn error_response(err: RelayError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match &err {
        RelayError::Internal(detail) => {
            error!("Internal error: {}", redact(detail));
            "An unexpected error occurred".to_string()
        }
        other => {
            let message = redact(&other.to_string());
            error!("Request failed ({}): {}", status.as_u16(), message);
            message
        }
    };

    (status, Json(ErrorResponse { error: message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mapping() {
        let (status, _) = error_response(RelayError::invalid_input("missing keyword"));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(RelayError::timeout("Naver news API"));
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

        let (status, _) = error_response(RelayError::forbidden("Google Custom Search", "billing"));
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let (status, Json(body)) = error_response(RelayError::internal("panic: secret state"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("secret state"));
    }
}
