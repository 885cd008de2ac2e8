#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL kernel code,
//! not mock implementations. This ensures tests verify actual behavior.
//! Each test builds its own [`TestApp`]: state is in memory, so apps are
//! cheap and isolated from each other.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ajaxform_kernel::form::JSON_CONTENT_TYPE;
use ajaxform_kernel::routes::app_router;
use ajaxform_kernel::{AppState, Config};

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new test application with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(&config).expect("Failed to initialize AppState");
        let router = app_router(state.clone());
        Self { router, state }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a request with cookies from a previous response.
    pub async fn request_with_cookies(&self, mut request: Request<Body>, cookies: &str) -> Response {
        if !cookies.is_empty() {
            request.headers_mut().insert(
                header::COOKIE,
                cookies.parse().expect("Invalid cookie header"),
            );
        }
        self.request(request).await
    }

    /// Fetch a form's initial data; returns the status, body and session cookies.
    pub async fn initial_data(
        &self,
        form_id: &str,
        query: &str,
        cookies: &str,
    ) -> (StatusCode, Value, String) {
        let uri = if query.is_empty() {
            format!("/form-manager/{form_id}")
        } else {
            format!("/form-manager/{form_id}?{query}")
        };
        let request = Request::get(uri)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Body::empty())
            .unwrap();

        let response = self.request_with_cookies(request, cookies).await;
        let new_cookies = extract_cookies(&response);
        let cookies = if new_cookies.is_empty() {
            cookies.to_string()
        } else {
            new_cookies
        };
        let (status, body) = json_response(response).await;
        (status, body, cookies)
    }

    /// Submit a JSON payload to a form with the given method.
    pub async fn submit(
        &self,
        form_id: &str,
        method: Method,
        payload: &Value,
        cookies: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(format!("/form-manager/{form_id}"))
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Body::from(payload.to_string()))
            .unwrap();

        json_response(self.request_with_cookies(request, cookies).await).await
    }
}

/// Read a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Split a response into its status and JSON body.
pub async fn json_response(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let text = body_text(response).await;
    let body = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Expected JSON body ({e}), got: {text}"));
    (status, body)
}

/// Extract Set-Cookie headers from a response for use in subsequent requests.
pub fn extract_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| {
            // Extract just the cookie name=value, ignoring attributes
            cookie.split(';').next()
        })
        .collect::<Vec<_>>()
        .join("; ")
}
