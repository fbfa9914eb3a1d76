//! HTTP API handlers for mplus-lookup

pub mod character;
pub mod health;
pub mod ui;

pub use character::{character_lookup, get_character};
pub use health::{health_check, UpstreamSettings};
pub use ui::{serve_app_js, serve_character_page, serve_index};
