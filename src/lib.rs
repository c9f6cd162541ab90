pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod fields;
pub mod handlers;
pub mod ports;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::services::NotificationProcessor;

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<NotificationProcessor>,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/payment/check",
            post(handlers::notification::instant_notification),
        )
        .route("/payment/return", post(handlers::notification::payment_return))
        .with_state(state)
}
