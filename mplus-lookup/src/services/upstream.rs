//! Upstream Mythic+ API client
//!
//! Two endpoints:
//! - `GET {base}/characters/profile` - character identity, run lists and
//!   season scores. Failure is fatal to the lookup.
//! - `GET {base}/mythic-plus/run-details` - roster of one run. Failure is
//!   reported as [`RunDetailOutcome::Unavailable`].
//!
//! The access key, when configured, is sent as the `access_key` query
//! parameter on both.

use async_trait::async_trait;
use mplus_common::config::LookupConfig;
use mplus_common::models::CharacterProfile;
use serde_json::Value;

use super::run_detail::{parse_run_detail, RunDetailOutcome, UnavailableReason};
use crate::error::LookupError;

const USER_AGENT: &str = concat!("mplus-lookup/", env!("CARGO_PKG_VERSION"));

/// Profile fields requested besides the season score field
const PROFILE_RUN_FIELDS: &str = "mythic_plus_recent_runs,mythic_plus_best_runs";

/// Upstream API operations used by the enrichment pipeline
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// Fetch a character profile with run lists and season scores
    async fn character_profile(
        &self,
        region: &str,
        realm: &str,
        name: &str,
    ) -> Result<CharacterProfile, LookupError>;

    /// Fetch the roster detail of one run
    async fn run_details(&self, run_id: u64, season: &str) -> RunDetailOutcome;
}

/// reqwest-backed upstream client
pub struct UpstreamClient {
    http_client: reqwest::Client,
    base_url: String,
    access_key: Option<String>,
    current_season: String,
}

impl UpstreamClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key().map(str::to_string),
            current_season: config.current_season.clone(),
        })
    }

    /// `fields` value for the profile request
    fn profile_fields(&self) -> String {
        format!(
            "{},mythic_plus_scores_by_season:{}",
            PROFILE_RUN_FIELDS, self.current_season
        )
    }

    fn get(&self, path: &str, params: &[(&str, String)]) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http_client.get(url).query(params);
        if let Some(key) = &self.access_key {
            request = request.query(&[("access_key", key)]);
        }
        request
    }
}

#[async_trait]
impl UpstreamApi for UpstreamClient {
    async fn character_profile(
        &self,
        region: &str,
        realm: &str,
        name: &str,
    ) -> Result<CharacterProfile, LookupError> {
        let params = [
            ("region", region.to_string()),
            ("realm", realm.to_string()),
            ("name", name.to_string()),
            ("fields", self.profile_fields()),
        ];

        tracing::debug!(region = %region, realm = %realm, name = %name, "Querying character profile");

        let response = self
            .get("/characters/profile", &params)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                region = %region,
                realm = %realm,
                name = %name,
                status = status.as_u16(),
                "Character profile request failed"
            );
            return Err(LookupError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let profile: CharacterProfile = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        tracing::info!(
            name = %profile.name,
            recent_runs = profile.mythic_plus_recent_runs.len(),
            best_runs = profile.mythic_plus_best_runs.len(),
            "Retrieved character profile"
        );

        Ok(profile)
    }

    async fn run_details(&self, run_id: u64, season: &str) -> RunDetailOutcome {
        let params = [("season", season.to_string()), ("id", run_id.to_string())];

        tracing::debug!(run_id, season = %season, "Querying run details");

        let response = match self.get("/mythic-plus/run-details", &params).send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = if e.is_timeout() {
                    UnavailableReason::TimedOut
                } else {
                    UnavailableReason::Transport(e.to_string())
                };
                tracing::warn!(run_id, season = %season, reason = %reason, "Run detail request failed");
                return RunDetailOutcome::Unavailable(reason);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                run_id,
                season = %season,
                status = status.as_u16(),
                body = %body,
                "Run detail unavailable"
            );
            return RunDetailOutcome::Unavailable(UnavailableReason::Status(status.as_u16()));
        }

        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                let reason = if e.is_timeout() {
                    UnavailableReason::TimedOut
                } else {
                    UnavailableReason::Malformed(e.to_string())
                };
                tracing::warn!(run_id, season = %season, reason = %reason, "Run detail body unreadable");
                return RunDetailOutcome::Unavailable(reason);
            }
        };

        match parse_run_detail(run_id, &payload) {
            Ok(detail) => {
                tracing::debug!(
                    run_id,
                    players = detail.players.len(),
                    average_item_level = ?detail.average_item_level,
                    "Retrieved run detail"
                );
                RunDetailOutcome::Found(detail)
            }
            Err(reason) => {
                tracing::warn!(run_id, reason = %reason, "Run detail payload rejected");
                RunDetailOutcome::Unavailable(reason)
            }
        }
    }
}
