//! Client script serving.
//!
//! The form client is compiled into the binary; its configuration is
//! generated from [`Config`](crate::config::Config) on each request.

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::state::AppState;

const APP_JS: &str = include_str!("../../assets/js/app.js");
const JS_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";

/// Create the static files router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/js/app.js", get(app_js))
        .route("/js/autoconf.js", get(autoconf_js))
}

/// Serve the form client.
async fn app_js(State(state): State<AppState>) -> Response {
    script(APP_JS.to_string(), state.config().production)
}

/// Serve the client configuration as a global `autoconf` object.
async fn autoconf_js(State(state): State<AppState>) -> Response {
    let config = state.config();
    script(
        autoconf_source(&config.app_url, config.production),
        config.production,
    )
}

fn autoconf_source(app_url: &str, production: bool) -> String {
    let settings = serde_json::json!({
        "APP_URL": app_url,
        "APP_PRODUCTION": production,
    });
    format!("var autoconf = {settings};\n")
}

fn script(source: String, production: bool) -> Response {
    // Development pages bust the cache with a query suffix instead.
    let cache_control = if production {
        "public, max-age=86400"
    } else {
        "no-cache"
    };

    (
        [
            (header::CONTENT_TYPE, JS_CONTENT_TYPE),
            (header::CACHE_CONTROL, cache_control),
        ],
        source,
    )
        .into_response()
}
