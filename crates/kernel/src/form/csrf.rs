//! CSRF token generation and single-use verification.
//!
//! Tokens are scoped to a (session, form id) pair. Issuing a token replaces
//! any previous token for the same pair; verifying a token erases it.

use std::sync::Arc;

use dashmap::DashMap;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::debug;

/// Key prefix for token slots.
const CSRF_PREFIX: &str = "csrf";

/// Default token validity period in seconds (1 hour).
pub const DEFAULT_TOKEN_VALIDITY_SECS: i64 = 3600;

/// Generate a random CSRF token.
///
/// 32 bytes from the thread-local CSPRNG plus the current timestamp, hashed
/// with SHA-256 and hex encoded (64 chars).
pub fn generate_csrf_token() -> String {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);

    let timestamp = chrono::Utc::now().timestamp();

    let mut hasher = Sha256::new();
    hasher.update(random_bytes);
    hasher.update(timestamp.to_le_bytes());

    hex::encode(hasher.finalize())
}

/// A token on file, with its issue time (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub value: String,
    pub issued_at: i64,
}

impl IssuedToken {
    /// Wrap a token issued now.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            issued_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Check whether the token is older than `validity_secs` at `now`.
    pub fn is_expired(&self, now: i64, validity_secs: i64) -> bool {
        now - self.issued_at > validity_secs
    }

    fn matches(&self, presented: &str) -> bool {
        self.value.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

/// Keyed token storage with an atomic check-and-erase primitive.
pub trait CsrfStore: Send + Sync {
    /// Store a token under `key`, replacing any previous token.
    fn put(&self, key: &str, token: IssuedToken);

    /// Remove and return the token under `key` if it equals `presented`.
    ///
    /// The comparison and the removal happen as one step: two concurrent
    /// callers presenting the same token cannot both receive it.
    fn take_matching(&self, key: &str, presented: &str) -> Option<IssuedToken>;

    /// Drop every token issued before `cutoff`. Returns how many were removed.
    fn prune(&self, cutoff: i64) -> usize;
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryCsrfStore {
    tokens: DashMap<String, IssuedToken>,
}

impl MemoryCsrfStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens on file.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether no token is on file.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl CsrfStore for MemoryCsrfStore {
    fn put(&self, key: &str, token: IssuedToken) {
        self.tokens.insert(key.to_string(), token);
    }

    fn take_matching(&self, key: &str, presented: &str) -> Option<IssuedToken> {
        self.tokens
            .remove_if(key, |_, token| token.matches(presented))
            .map(|(_, token)| token)
    }

    fn prune(&self, cutoff: i64) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, token| token.issued_at >= cutoff);
        before.saturating_sub(self.tokens.len())
    }
}

/// Per-session view of the token store, passed into the form handler.
#[derive(Clone)]
pub struct FormSession {
    session_key: String,
    store: Arc<dyn CsrfStore>,
    validity_secs: i64,
}

impl FormSession {
    /// Create a session context with the default token validity.
    pub fn new(session_key: impl Into<String>, store: Arc<dyn CsrfStore>) -> Self {
        Self {
            session_key: session_key.into(),
            store,
            validity_secs: DEFAULT_TOKEN_VALIDITY_SECS,
        }
    }

    /// Override the token validity period.
    pub fn with_validity(mut self, validity_secs: i64) -> Self {
        self.validity_secs = validity_secs;
        self
    }

    /// The session key tokens are scoped to.
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// Issue a fresh token for `form_id`, invalidating the previous one.
    pub fn issue(&self, form_id: &str) -> String {
        let token = generate_csrf_token();
        self.store.put(&self.slot(form_id), IssuedToken::new(&token));
        debug!(form_id = %form_id, "CSRF token issued");
        token
    }

    /// Verify and consume the token presented for `form_id`.
    ///
    /// Returns true at most once per issued token. A mismatched presentation
    /// leaves the issued token in place; an expired one is erased.
    pub fn consume(&self, form_id: &str, presented: &str) -> bool {
        if presented.is_empty() {
            return false;
        }

        let Some(token) = self.store.take_matching(&self.slot(form_id), presented) else {
            debug!(form_id = %form_id, "CSRF token absent or mismatched");
            return false;
        };

        if token.is_expired(chrono::Utc::now().timestamp(), self.validity_secs) {
            debug!(form_id = %form_id, "CSRF token expired");
            return false;
        }

        debug!(form_id = %form_id, "CSRF token consumed");
        true
    }

    fn slot(&self, form_id: &str) -> String {
        format!("{CSRF_PREFIX}:{}:{form_id}", self.session_key)
    }
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("session_key", &self.session_key)
            .field("validity_secs", &self.validity_secs)
            .finish()
    }
}
