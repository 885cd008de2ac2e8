//! Configuration loaded from environment variables.

use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;

use anyhow::{Context, Result, bail};

use crate::session::DEFAULT_SESSION_EXPIRY_HOURS;

/// Accepted session inactivity expiry, in hours (up to a year).
pub const SESSION_EXPIRY_HOURS_RANGE: RangeInclusive<i64> = 1..=24 * 365;

/// Accepted CSRF token validity, in seconds (up to 30 days).
pub const CSRF_TOKEN_TTL_SECS_RANGE: RangeInclusive<i64> = 1..=30 * 24 * 3600;

/// Accepted interval between expiry sweeps, in seconds (up to a day).
pub const CSRF_PRUNE_INTERVAL_SECS_RANGE: RangeInclusive<u64> = 1..=24 * 3600;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Public application URL used to build form submit URLs
    /// (default: `http://localhost:{port}`).
    pub app_url: String,

    /// Production mode: secure session cookies, no asset cache-busting
    /// (default: false).
    pub production: bool,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,

    /// Session inactivity expiry in hours (default: 24).
    pub session_expiry_hours: i64,

    /// CSRF token validity in seconds (default: 3600).
    pub csrf_token_ttl_secs: i64,

    /// Interval between expired CSRF token sweeps in seconds (default: 300).
    pub csrf_prune_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            app_url: "http://localhost:3000".to_string(),
            production: false,
            cookie_same_site: "strict".to_string(),
            session_expiry_hours: DEFAULT_SESSION_EXPIRY_HOURS,
            csrf_token_ttl_secs: 3600,
            csrf_prune_interval_secs: 300,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let app_url = env::var("APP_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        let production = env::var("APP_PRODUCTION")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        let session_expiry_hours = env::var("SESSION_EXPIRY_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .context("SESSION_EXPIRY_HOURS must be a valid i64")?;
        let session_expiry_hours = in_range(
            "SESSION_EXPIRY_HOURS",
            session_expiry_hours,
            &SESSION_EXPIRY_HOURS_RANGE,
        )?;

        let csrf_token_ttl_secs = env::var("CSRF_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .context("CSRF_TOKEN_TTL_SECS must be a valid i64")?;
        let csrf_token_ttl_secs = in_range(
            "CSRF_TOKEN_TTL_SECS",
            csrf_token_ttl_secs,
            &CSRF_TOKEN_TTL_SECS_RANGE,
        )?;

        let csrf_prune_interval_secs = env::var("CSRF_PRUNE_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .context("CSRF_PRUNE_INTERVAL_SECS must be a valid u64")?;
        let csrf_prune_interval_secs = in_range(
            "CSRF_PRUNE_INTERVAL_SECS",
            csrf_prune_interval_secs,
            &CSRF_PRUNE_INTERVAL_SECS_RANGE,
        )?;

        Ok(Self {
            port,
            app_url,
            production,
            cookie_same_site,
            session_expiry_hours,
            csrf_token_ttl_secs,
            csrf_prune_interval_secs,
        })
    }
}

/// Reject a parsed setting outside its accepted range.
fn in_range<T: PartialOrd + Display>(name: &str, value: T, range: &RangeInclusive<T>) -> Result<T> {
    if !range.contains(&value) {
        bail!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        );
    }
    Ok(value)
}
