//! HTTP route handlers.

pub mod forms;
pub mod front;
pub mod health;
pub mod static_files;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::session;
use crate::state::AppState;

/// Build the application router with its session and tracing layers.
pub fn app_router(state: AppState) -> Router {
    let config = state.config();
    let session_layer = session::create_session_layer(
        state.session_store().clone(),
        session::parse_same_site(&config.cookie_same_site),
        config.production,
        config.session_expiry_hours,
    );

    Router::new()
        .merge(front::router())
        .merge(forms::router())
        .merge(health::router())
        .merge(static_files::router())
        // Middleware layers (last added = first executed in request flow):
        // TraceLayer → session → routes
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
