//! Liveness endpoint
//!
//! Reports uptime and the upstream settings lookups run against. The
//! upstream API is never contacted and the access key is never echoed.

use axum::{extract::State, Json};
use chrono::Utc;
use mplus_common::config::LookupConfig;
use serde::Serialize;

use crate::AppState;

/// Upstream settings in effect, safe to expose
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub current_season: String,
    pub default_season: String,
    pub access_key_configured: bool,
    pub detail_timeout_secs: Option<u64>,
}

impl UpstreamSettings {
    pub fn from_config(config: &LookupConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            current_season: config.current_season.clone(),
            default_season: config.default_season.clone(),
            access_key_configured: config.access_key().is_some(),
            detail_timeout_secs: config.detail_timeout_secs,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub upstream: UpstreamSettings,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
        upstream: state.upstream.as_ref().clone(),
    })
}
