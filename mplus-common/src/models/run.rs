//! Run summaries as reported by the upstream profile endpoint, and the
//! enriched form handed to the presentation layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Seasonal dungeon modifier
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Affix {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wowhead_url: String,
}

/// One completed keystone run from a character's recent or best list
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunSummary {
    /// Dungeon display name
    pub dungeon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_name: String,
    /// Keystone level
    pub mythic_level: i32,
    pub completed_at: DateTime<Utc>,
    pub clear_time_ms: i64,
    /// Time budget for a timed completion
    pub par_time_ms: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_keystone_upgrades: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    /// Detail page URL on the upstream site
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub keystone_run_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affixes: Vec<Affix>,
}

impl RunSummary {
    /// Run identifier used to key run details
    ///
    /// Prefers the upstream `keystone_run_id`. Falls back to the leading
    /// digits of the last URL segment (`.../12345-16-the-stonevault`).
    pub fn run_id(&self) -> Option<u64> {
        self.keystone_run_id.or_else(|| run_id_from_url(&self.url))
    }
}

/// Extract the numeric run id prefix from a run detail URL
pub fn run_id_from_url(url: &str) -> Option<u64> {
    let last = url.trim_end_matches('/').rsplit('/').next()?;
    let digits: String = last.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Roster makeup of a run
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Composition {
    /// Class slugs in roster order
    pub classes: Vec<String>,
    pub tanks: usize,
    pub healers: usize,
    pub dps: usize,
}

/// A run summary plus statistics derived from it and its roster detail
///
/// Item-level fields and `composition` are `None` when no run detail was
/// available. `time_diff_percent` is `None` when the par time is not
/// positive.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnrichedRun {
    #[serde(flatten)]
    pub summary: RunSummary,
    pub run_id: Option<u64>,
    /// Deviation of clear time from par time, in percent (negative = under par)
    pub time_diff_percent: Option<f64>,
    pub clear_time_minutes: f64,
    pub par_time_minutes: f64,
    /// Subject character's equipped item level in this run
    pub player_ilvl: Option<f64>,
    /// Average equipped item level of the other roster members
    pub other_avg_ilvl: Option<f64>,
    /// `player_ilvl - other_avg_ilvl`
    pub ilvl_delta: Option<f64>,
    pub composition: Option<Composition>,
}
