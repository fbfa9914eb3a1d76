//! mplus-lookup library - Mythic+ character lookup service
//!
//! Fetches a character's keystone run history from the upstream API,
//! enriches every run with roster-derived statistics and serves the result
//! as JSON or as a client-rendered web page.

pub mod api;
pub mod cli;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult, LookupError};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use mplus_common::config::LookupConfig;

use crate::api::UpstreamSettings;
use crate::services::CharacterAssembler;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Lookup pipeline entry point
    pub assembler: Arc<CharacterAssembler>,
    /// Upstream settings reported by the health endpoint
    pub upstream: Arc<UpstreamSettings>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(assembler: CharacterAssembler, config: &LookupConfig) -> Self {
        Self {
            assembler: Arc::new(assembler),
            upstream: Arc::new(UpstreamSettings::from_config(config)),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        // UI routes (HTML pages)
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/character-lookup", get(api::character_lookup))
        .route("/character/:region/:realm/:name", get(api::serve_character_page))
        // API routes
        .route("/api/character/:region/:realm/:name", get(api::get_character))
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
