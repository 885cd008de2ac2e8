//! Front page route handler: the record list.

use axum::{Router, extract::State, response::Html, routing::get};

use crate::error::AppResult;
use crate::state::AppState;
use crate::theme::RecordListPage;

/// Create the front page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(front_page))
}

/// Record list with one modal per registered form.
async fn front_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let modals = state
        .forms()
        .iter()
        .map(|form| state.theme().render_modal(form.as_ref()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let persons = state.repos().persons.get_all();
    let page = RecordListPage {
        app_url: &state.config().app_url,
        persons: &persons,
        modals,
        asset_suffix: asset_suffix(state.config().production),
    };

    Ok(Html(state.theme().render_record_list(&page)?))
}

/// Cache-busting query appended to script URLs outside production.
fn asset_suffix(production: bool) -> String {
    if production {
        String::new()
    } else {
        format!("?v={}", chrono::Utc::now().timestamp())
    }
}
