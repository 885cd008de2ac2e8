//! Theme engine and template rendering.
//!
//! Renders the record list page and one modal per form with Tera.

mod engine;

pub use engine::{RecordListPage, SharedThemeEngine, ThemeEngine};
