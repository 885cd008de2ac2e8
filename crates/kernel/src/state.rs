//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::form::variants::record_forms;
use crate::form::{CsrfStore, FormRegistry, FormSession, MemoryCsrfStore};
use crate::models::Repositories;
use crate::session::SessionRecords;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration the state was built from.
    config: Config,

    /// Entity repositories backing the forms.
    repos: Repositories,

    /// Forms served under `/form-manager/{form_id}`.
    forms: FormRegistry,

    /// Single-use CSRF tokens of every session.
    csrf_store: Arc<MemoryCsrfStore>,

    /// Cookie session records.
    session_store: SessionRecords,

    /// Template engine for the list page and modals.
    theme: ThemeEngine,
}

impl AppState {
    /// Create the application state with the demo repositories.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_repositories(config, Repositories::demo())
    }

    /// Create the application state over the given repositories.
    pub fn with_repositories(config: &Config, repos: Repositories) -> Result<Self> {
        let mut forms = FormRegistry::new();
        for form in record_forms(&config.app_url, &repos).context("invalid form descriptor")? {
            forms.register(form)?;
        }
        info!(forms = forms.len(), "forms registered");

        let theme = ThemeEngine::new().context("failed to initialize theme engine")?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config: config.clone(),
                repos,
                forms,
                csrf_store: Arc::new(MemoryCsrfStore::new()),
                session_store: SessionRecords::new(),
                theme,
            }),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the entity repositories.
    pub fn repos(&self) -> &Repositories {
        &self.inner.repos
    }

    /// Get the form registry.
    pub fn forms(&self) -> &FormRegistry {
        &self.inner.forms
    }

    /// Get the CSRF token store.
    pub fn csrf_store(&self) -> &Arc<MemoryCsrfStore> {
        &self.inner.csrf_store
    }

    /// Get the session store.
    pub fn session_store(&self) -> &SessionRecords {
        &self.inner.session_store
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Token scope for one session, with the configured validity.
    pub fn form_session(&self, session_key: impl Into<String>) -> FormSession {
        let store: Arc<dyn CsrfStore> = self.inner.csrf_store.clone();
        FormSession::new(session_key, store).with_validity(self.inner.config.csrf_token_ttl_secs)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("forms", &self.inner.forms)
            .field("csrf_tokens", &self.inner.csrf_store.len())
            .field("sessions", &self.inner.session_store.len())
            .finish()
    }
}
