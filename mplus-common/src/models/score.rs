//! Ranked season score snapshots

use serde::{Deserialize, Serialize};

/// Per-role score values for one season
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RoleScores {
    #[serde(default)]
    pub all: f64,
    #[serde(default)]
    pub dps: f64,
    #[serde(default)]
    pub healer: f64,
    #[serde(default)]
    pub tank: f64,
    #[serde(default)]
    pub spec_0: f64,
    #[serde(default)]
    pub spec_1: f64,
    #[serde(default)]
    pub spec_2: f64,
    #[serde(default)]
    pub spec_3: f64,
}

/// Score snapshot for one ranked season
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeasonScore {
    /// Season identifier (e.g. "season-tww-2")
    pub season: String,
    #[serde(default)]
    pub scores: RoleScores,
}

impl SeasonScore {
    /// Score object built from best-run scores when the upstream reports none
    ///
    /// Overall is the exact sum of the run scores; every role score is zero.
    pub fn synthesized(season: &str, run_scores: impl IntoIterator<Item = f64>) -> Self {
        let all = run_scores.into_iter().sum();
        Self {
            season: season.to_string(),
            scores: RoleScores {
                all,
                ..RoleScores::default()
            },
        }
    }
}
