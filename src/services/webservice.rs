//! Back-office webservice calls.
//!
//! Only subscription cancellation is wrapped today. The wire encoding is
//! the transport's business; this layer owns header construction and the
//! HMAC auth token both directions of the exchange use.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use tracing::info;
use uuid::Uuid;

use crate::domain::Transaction;
use crate::error::WebserviceError;
use crate::services::signature::SignatureService;

type HmacSha256 = Hmac<Sha256>;

/// Which side of the exchange a token authenticates. The gateway signs
/// its responses over the same pair in the reverse order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenDirection {
    Request,
    Response,
}

/// Headers carried by every webservice call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestHeaders {
    pub shop_id: String,
    pub request_id: String,
    pub timestamp: String,
    pub mode: String,
    pub auth_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelSubscriptionQuery {
    pub submission_date: String,
    pub payment_token: String,
    pub subscription_id: String,
}

/// Carries a cancellation to the gateway and reports the top-level
/// response code, zero meaning accepted.
#[async_trait]
pub trait CancellationTransport: Send + Sync {
    async fn cancel_subscription(
        &self,
        headers: &RequestHeaders,
        query: &CancelSubscriptionQuery,
    ) -> Result<i64, WebserviceError>;
}

pub struct WebserviceClient {
    site_id: String,
    signer: SignatureService,
    transport: Arc<dyn CancellationTransport>,
}

impl WebserviceClient {
    pub fn new(
        site_id: impl Into<String>,
        signer: SignatureService,
        transport: Arc<dyn CancellationTransport>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            signer,
            transport,
        }
    }

    /// base64( HMAC-SHA256(certificate, requestId + timestamp) ), with the
    /// concatenation reversed for the response direction.
    pub fn auth_token(&self, request_id: &str, timestamp: &str, direction: TokenDirection) -> String {
        let data = match direction {
            TokenDirection::Request => format!("{request_id}{timestamp}"),
            TokenDirection::Response => format!("{timestamp}{request_id}"),
        };
        let mut mac = HmacSha256::new_from_slice(self.signer.certificate().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(data.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Asks the gateway to stop a running subscription. Returns whether
    /// the gateway accepted.
    pub async fn cancel_subscription(
        &self,
        transaction: &Transaction,
    ) -> Result<bool, WebserviceError> {
        let subscription_id = transaction
            .subscription
            .as_ref()
            .and_then(|s| s.identifier.as_deref())
            .ok_or(WebserviceError::MissingSubscription(transaction.id))?;
        let payment_token = transaction
            .alias
            .as_ref()
            .and_then(|a| a.identifier.as_deref())
            .ok_or(WebserviceError::MissingAlias(transaction.id))?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let request_id = Uuid::new_v4().to_string();
        let headers = RequestHeaders {
            shop_id: self.site_id.clone(),
            request_id: request_id.clone(),
            timestamp: timestamp.clone(),
            mode: self.signer.mode().as_str().to_string(),
            auth_token: self.auth_token(&request_id, &timestamp, TokenDirection::Request),
        };
        let query = CancelSubscriptionQuery {
            submission_date: timestamp,
            payment_token: payment_token.to_string(),
            subscription_id: subscription_id.to_string(),
        };

        let code = self.transport.cancel_subscription(&headers, &query).await?;
        info!(
            order_id = %transaction.id,
            response_code = code,
            "subscription cancellation answered"
        );
        Ok(code == 0)
    }
}
