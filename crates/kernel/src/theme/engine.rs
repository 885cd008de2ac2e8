//! Theme engine with embedded Tera templates.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tera::Tera;
use tracing::debug;

use crate::form::{CSRF_TOKEN_FIELD, FORM_ID_FIELD, FormVariant};
use crate::models::Person;

/// Templates compiled into the binary, keyed by name.
const TEMPLATES: [(&str, &str); 3] = [
    ("form/element.html", include_str!("../../templates/form/element.html")),
    ("form/modal.html", include_str!("../../templates/form/modal.html")),
    (
        "page/record-list.html",
        include_str!("../../templates/page/record-list.html"),
    ),
];

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine with the built-in templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)
            .context("failed to initialize Tera templates")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Render the modal of a form: its data attributes, hidden protocol
    /// fields and declared inputs. Values are filled in by the client.
    pub fn render_modal(&self, form: &dyn FormVariant) -> Result<String> {
        let descriptor = form.descriptor();

        let mut context = tera::Context::new();
        context.insert("form", descriptor);
        context.insert("inputs", &form.inputs());
        context.insert("form_id_field", FORM_ID_FIELD);
        context.insert("csrf_token_field", CSRF_TOKEN_FIELD);

        self.tera
            .render("form/modal.html", &context)
            .with_context(|| format!("failed to render modal: {}", descriptor.form_id()))
    }

    /// Render the record list page.
    pub fn render_record_list(&self, page: &RecordListPage<'_>) -> Result<String> {
        let context =
            tera::Context::from_serialize(page).context("failed to build record list context")?;

        self.tera
            .render("page/record-list.html", &context)
            .context("failed to render record list page")
    }
}

/// Values rendered by the record list page.
#[derive(Debug, Serialize)]
pub struct RecordListPage<'a> {
    pub app_url: &'a str,
    pub persons: &'a [Person],
    /// Pre-rendered modals, one per form.
    pub modals: Vec<String>,
    /// Appended to script URLs; empty in production.
    pub asset_suffix: String,
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("template_count", &self.tera.get_template_names().count())
            .finish()
    }
}

/// Wrap ThemeEngine in Arc for sharing across handlers.
pub type SharedThemeEngine = Arc<ThemeEngine>;
