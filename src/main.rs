use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payzen_core::adapters::{MemoryTransactionStore, TracingEventSink};
use payzen_core::config::Config;
use payzen_core::services::{NotificationProcessor, SignatureService};
use payzen_core::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let signer = SignatureService::new(
        config.mode,
        config.certificate_test.clone(),
        config.certificate_prod.clone(),
    );
    tracing::info!(mode = signer.mode().as_str(), site_id = %config.site_id, "gateway configured");

    let store = Arc::new(MemoryTransactionStore::new());
    let processor = Arc::new(NotificationProcessor::new(
        signer,
        store.clone(),
        store,
        Arc::new(TracingEventSink),
    ));

    let app = create_app(AppState { processor });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
