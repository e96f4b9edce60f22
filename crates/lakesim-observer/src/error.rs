//! Failures a request to the observer can hit.
//!
//! Every variant renders as `{"error": ..., "status": ...}` with a
//! matching HTTP status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request-level error returned by observer handlers.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// Nothing to serve yet, e.g. before the first tick.
    #[error("{what} not available")]
    NotFound {
        /// What was asked for.
        what: &'static str,
    },

    /// The request was well-formed but its values were refused.
    #[error("bad request: {reason}")]
    BadRequest {
        /// Why the values were refused.
        reason: String,
    },

    /// Operator endpoints were called on a server started without controls.
    #[error("operator controls are not attached")]
    OperatorUnavailable,

    /// A response body failed to serialize.
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ObserverError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::OperatorUnavailable | Self::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_status_codes() {
        assert_eq!(
            ObserverError::NotFound { what: "snapshot" }.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ObserverError::BadRequest {
                reason: "x".to_owned()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ObserverError::OperatorUnavailable.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
