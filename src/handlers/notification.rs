//! Gateway-facing endpoints.

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, Form};
use tracing::{info, warn};

use crate::error::NotificationError;
use crate::AppState;

/// Instant-notification endpoint the gateway posts outcomes to.
///
/// 204 for everything the protocol tolerates, 400 when the notification
/// fails verification so the rejection shows up in the gateway back
/// office.
pub async fn instant_notification(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<StatusCode, NotificationError> {
    match state.processor.handle(fields).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(err) => {
            warn!(error = %err, "notification refused");
            Err(err)
        }
    }
}

/// Landing endpoint for the payer's browser coming back from the payment
/// page. The authoritative outcome arrives on the check URL, so this only
/// logs.
pub async fn payment_return(Form(fields): Form<HashMap<String, String>>) -> StatusCode {
    info!(
        order_id = fields.get("vads_order_id").map(String::as_str).unwrap_or_default(),
        "payer returned from payment page"
    );
    StatusCode::NO_CONTENT
}
