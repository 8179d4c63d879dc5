//! Mapping of bridge errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::common::errors::BridgeError;

impl BridgeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            BridgeError::QueueFull => StatusCode::SERVICE_UNAVAILABLE,
            BridgeError::Configuration(_) | BridgeError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Errors go out as plain text: the decoder message for bad bodies,
/// `queue full` for backpressure.
impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let malformed = BridgeError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BridgeError::QueueFull.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            BridgeError::Configuration("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_queue_full_response() {
        let response = BridgeError::QueueFull.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
