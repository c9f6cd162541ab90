use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by a transaction persistence backend.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("transaction store: {0}")]
pub struct StoreError(pub String);

/// Why a gateway notification was refused.
///
/// Every variant except `Store` means the request failed authentication
/// or is structurally unusable, and maps to a 400 so the gateway
/// operator sees the rejection in their back office.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotificationError {
    #[error("signature not found or corrupted")]
    Signature,

    #[error("no order id in the notification")]
    MissingOrderId,

    #[error("no check source in the notification")]
    MissingCheckSource,

    #[error("no auth result in the notification")]
    MissingAuthResult,

    #[error("bad trans id for order {0}")]
    TransId(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl NotificationError {
    fn status_code(&self) -> StatusCode {
        match self {
            NotificationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Failure while allocating a gateway transaction number.
#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("could not lock sequence file {}", .path.display())]
    LockTimeout { path: PathBuf },

    #[error("sequence file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while calling the back-office webservice.
#[derive(Error, Debug)]
pub enum WebserviceError {
    #[error("transaction {0} has no subscription identifier")]
    MissingSubscription(Uuid),

    #[error("transaction {0} has no alias token")]
    MissingAlias(Uuid),

    #[error("cancellation transport: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupted_notification_maps_to_bad_request() {
        for error in [
            NotificationError::Signature,
            NotificationError::MissingOrderId,
            NotificationError::MissingCheckSource,
            NotificationError::MissingAuthResult,
            NotificationError::TransId("abc".to_string()),
        ] {
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn store_failure_maps_to_internal_error() {
        let error = NotificationError::Store(StoreError("backend down".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn signature_error_response_is_bad_request() {
        let response = NotificationError::Signature.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lock_timeout_names_the_file() {
        let error = SequenceError::LockTimeout {
            path: PathBuf::from("/var/payzen/trans_numbers"),
        };
        assert!(error.to_string().contains("/var/payzen/trans_numbers"));
    }
}
