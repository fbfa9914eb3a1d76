//! Per-run roster snapshots

use serde::{Deserialize, Serialize};

/// Combat role of a roster member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tank,
    Dps,
    Healer,
}

/// One participant in a run
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RosterPlayer {
    pub character_name: String,
    /// Class slug (e.g. "death-knight")
    pub character_class: String,
    pub character_role: Role,
    pub profile_url: String,
    /// Equipped item level, one decimal place; absent when not reported
    pub item_level: Option<f64>,
}

/// Roster detail of one run
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunDetail {
    /// Run id this detail was requested for
    pub run_id: u64,
    /// Run id as reported by the detail endpoint
    pub keystone_run_id: u64,
    pub players: Vec<RosterPlayer>,
    /// Mean item level over players that reported one, one decimal place
    pub average_item_level: Option<f64>,
}
