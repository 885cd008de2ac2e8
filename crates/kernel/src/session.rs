//! Cookie sessions backed by an in-memory store with expired-record sweeps.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use uuid::Uuid;

/// Default session expiry (24 hours).
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Session key holding the random key that scopes CSRF tokens.
pub const SESSION_FORM_KEY: &str = "form_session";

/// In-memory session records.
///
/// Expired records are never returned by `load`, and
/// [`delete_expired`](ExpiredDeletion::delete_expired) drops them for good.
#[derive(Debug, Clone, Default)]
pub struct SessionRecords {
    records: Arc<DashMap<Id, Record>>,
}

impl SessionRecords {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn is_active(record: &Record, now: OffsetDateTime) -> bool {
    record.expiry_date > now
}

#[async_trait]
impl SessionStore for SessionRecords {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        loop {
            match self.records.entry(record.id) {
                Entry::Occupied(_) => record.id = Id::default(),
                Entry::Vacant(slot) => {
                    slot.insert(record.clone());
                    return Ok(());
                }
            }
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .records
            .get(session_id)
            .filter(|record| is_active(record, now))
            .map(|record| record.value().clone()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SessionRecords {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc();
        self.records.retain(|_, record| is_active(record, now));
        Ok(())
    }
}

/// Map a configured SameSite policy name; unknown names fall back to strict.
pub fn parse_same_site(value: &str) -> SameSite {
    match value {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

/// Create the session layer over `store`.
///
/// `secure` restricts the cookie to HTTPS and is enabled in production.
/// `expiry_hours` must already be range-checked by the configuration.
pub fn create_session_layer(
    store: SessionRecords,
    same_site: SameSite,
    secure: bool,
    expiry_hours: i64,
) -> SessionManagerLayer<SessionRecords> {
    SessionManagerLayer::new(store)
        .with_secure(secure)
        .with_http_only(true)
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::hours(expiry_hours)))
}

/// Key scoping this session's CSRF tokens, if one was stored.
///
/// Reading never creates a session record.
pub async fn stored_form_session_key(session: &Session) -> Result<Option<String>> {
    session
        .get::<String>(SESSION_FORM_KEY)
        .await
        .context("failed to read form session key")
}

/// A fresh key, not yet bound to any session.
pub fn new_form_session_key() -> String {
    Uuid::new_v4().to_string()
}

/// Bind `key` to the session; this is what creates the session record.
pub async fn store_form_session_key(session: &Session, key: &str) -> Result<()> {
    session
        .insert(SESSION_FORM_KEY, key)
        .await
        .context("failed to store form session key")
}
