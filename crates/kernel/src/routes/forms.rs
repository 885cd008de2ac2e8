//! Form endpoints: one URL per form, every method routed to its handler.

use std::collections::HashMap;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, header};
use axum::routing::any;
use tower_sessions::Session;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::form::{Envelope, FormHandler, FormRequest};
use crate::session::{new_form_session_key, store_form_session_key, stored_form_session_key};
use crate::state::AppState;

/// Create the form endpoints router.
pub fn router() -> Router<AppState> {
    Router::new().route("/form-manager/{form_id}", any(manage_form))
}

/// Run one form exchange.
///
/// Unknown forms are a plain 404; everything else is answered by the
/// form handler with a JSON envelope.
async fn manage_form(
    State(state): State<AppState>,
    session: Session,
    Path(form_id): Path<String>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> AppResult<Envelope> {
    let form = state.forms().get(&form_id).ok_or(AppError::NotFound)?;

    let stored_key = stored_form_session_key(&session).await.map_err(|e| {
        warn!(form_id = %form_id, error = %e, "form session unavailable");
        AppError::Internal(e)
    })?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let request = FormRequest::new(method, content_type)
        .with_query(query)
        .with_body(body);

    // Without a stored key, tokens are issued under a fresh one that is only
    // bound to the session once a token has actually been handed out.
    let session_key = stored_key.clone().unwrap_or_else(new_form_session_key);
    let envelope =
        FormHandler::new(form.as_ref()).manage(&request, &state.form_session(&session_key));

    if stored_key.is_none() && *request.method() == Method::GET && envelope.is_ok() {
        store_form_session_key(&session, &session_key)
            .await
            .map_err(|e| {
                warn!(form_id = %form_id, error = %e, "form session unavailable");
                AppError::Internal(e)
            })?;
    }

    Ok(envelope)
}
