//! AjaxForm server
//!
//! Serves the record list page and the AJAX form endpoints.

use std::net::SocketAddr;
use std::time::Duration;

use ajaxform_kernel::form::CsrfStore;
use ajaxform_kernel::routes::app_router;
use ajaxform_kernel::{AppState, Config};
use anyhow::{Context, Result};
use tower_sessions::session_store::ExpiredDeletion;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    info!("Starting AjaxForm server");

    // Load configuration from environment
    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, app_url = %config.app_url, "Configuration loaded");

    let state = AppState::new(&config).context("failed to initialize application state")?;

    spawn_expiry_sweeper(
        state.clone(),
        Duration::from_secs(config.csrf_prune_interval_secs),
    );

    let app = app_router(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Periodically drop CSRF tokens older than their validity window and
/// expired session records.
fn spawn_expiry_sweeper(state: AppState, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let cutoff = chrono::Utc::now()
                .timestamp()
                .saturating_sub(state.config().csrf_token_ttl_secs);
            let removed = state.csrf_store().prune(cutoff);
            if removed > 0 {
                debug!(removed, remaining = state.csrf_store().len(), "pruned expired CSRF tokens");
            }

            let sessions = state.session_store().len();
            if let Err(e) = state.session_store().delete_expired().await {
                warn!(error = %e, "failed to delete expired sessions");
            }
            let remaining = state.session_store().len();
            if remaining < sessions {
                debug!(removed = sessions - remaining, remaining, "deleted expired sessions");
            }
        }
    });
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
