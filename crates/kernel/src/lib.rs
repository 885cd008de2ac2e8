//! AjaxForm Kernel Library
//!
//! This library exposes the form protocol, the demo record forms and the
//! HTTP routes for integration testing. The main entry point for running the
//! server is the `ajaxform` binary.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod theme;

pub use config::Config;
pub use error::{AppError, AppResult, FormError};
pub use state::AppState;
