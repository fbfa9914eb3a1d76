//! Difficulty brackets and their aggregate statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed keystone-level band
///
/// Bands are contiguous and cover every level >= 1. Levels below 1 belong
/// to no band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Bracket {
    #[serde(rename = "1-3")]
    Low,
    #[serde(rename = "4-6")]
    Mid,
    #[serde(rename = "7-9")]
    High,
    #[serde(rename = "10+")]
    Top,
}

impl Bracket {
    /// All bands in ascending order
    pub const ALL: [Bracket; 4] = [Bracket::Low, Bracket::Mid, Bracket::High, Bracket::Top];

    /// Band for a keystone level, `None` for levels below 1
    pub fn for_level(level: i32) -> Option<Self> {
        match level {
            i32::MIN..=0 => None,
            1..=3 => Some(Bracket::Low),
            4..=6 => Some(Bracket::Mid),
            7..=9 => Some(Bracket::High),
            _ => Some(Bracket::Top),
        }
    }
}

/// Aggregate over the runs of one band
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct BracketStat {
    /// Mean `time_diff_percent` of runs that have one
    pub avg_time_diff_percent: Option<f64>,
    /// Mean `ilvl_delta` of runs that have one
    pub avg_ilvl_delta: Option<f64>,
    /// Runs assigned to the band, including ones without derived fields
    pub count: usize,
}

/// Statistics for every band, keyed by band
pub type BracketStats = BTreeMap<Bracket, BracketStat>;
