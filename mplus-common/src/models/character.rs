//! Character profile as returned upstream, and the assembled lookup result

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use super::null_as_default;
use super::{BracketStats, EnrichedRun, RunDetail, RunSummary, SeasonScore};

/// Raw character profile from the upstream profile endpoint
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CharacterProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub race: String,
    #[serde(rename = "class", default, deserialize_with = "null_as_default")]
    pub class_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_spec_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_spec_role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub realm: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(default, deserialize_with = "lenient_runs")]
    pub mythic_plus_recent_runs: Vec<RunSummary>,
    #[serde(default, deserialize_with = "lenient_runs")]
    pub mythic_plus_best_runs: Vec<RunSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mythic_plus_scores_by_season: Vec<SeasonScore>,
}

/// Decode a run list entry by entry
///
/// A `null` list is empty. An entry that does not decode as a
/// [`RunSummary`] is logged and skipped; the rest of the list survives.
fn lenient_runs<'de, D>(deserializer: D) -> Result<Vec<RunSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Value> = null_as_default(deserializer)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match RunSummary::deserialize(entry) {
            Ok(run) => Some(run),
            Err(e) => {
                warn!(entry = index, error = %e, "Skipping undecodable run summary");
                None
            }
        })
        .collect())
}

/// Fully assembled lookup result for one character
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CharacterResult {
    pub name: String,
    pub race: String,
    pub class_name: String,
    pub active_spec_name: String,
    pub active_spec_role: String,
    pub region: String,
    pub realm: String,
    pub profile_url: String,
    pub thumbnail_url: String,
    /// Score snapshot for the configured current season
    pub season_score: SeasonScore,
    pub recent_runs: Vec<EnrichedRun>,
    pub best_runs: Vec<EnrichedRun>,
    /// Run details that were obtained, keyed by run id
    pub run_details: BTreeMap<u64, RunDetail>,
    pub bracket_stats: BracketStats,
}
