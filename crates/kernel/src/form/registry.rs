//! Registry of the forms served by the application.

use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::debug;

use super::handler::FormVariant;

/// Forms keyed by id, kept in registration order.
#[derive(Default)]
pub struct FormRegistry {
    forms: Vec<Arc<dyn FormVariant>>,
}

impl FormRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a form. Form ids must be unique.
    pub fn register(&mut self, form: Arc<dyn FormVariant>) -> Result<()> {
        let form_id = form.descriptor().form_id();
        if self.get(form_id).is_some() {
            bail!("form '{form_id}' is already registered");
        }
        debug!(form_id = %form_id, method = %form.descriptor().method(), "form registered");
        self.forms.push(form);
        Ok(())
    }

    /// Look up a form by id.
    pub fn get(&self, form_id: &str) -> Option<Arc<dyn FormVariant>> {
        self.forms
            .iter()
            .find(|form| form.descriptor().form_id() == form_id)
            .cloned()
    }

    /// All forms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn FormVariant>> {
        self.forms.iter()
    }

    /// Number of registered forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Check whether no form is registered.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl std::fmt::Debug for FormRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.forms.iter().map(|form| form.descriptor().form_id()))
            .finish()
    }
}
