//! Run detail decoding
//!
//! Roster entries are decoded one at a time: an entry missing a required
//! field is logged and skipped, the rest of the run detail survives.

use mplus_common::models::{Role, RosterPlayer, RunDetail};
use mplus_common::numeric::{mean1, round1};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Result of one run-detail fetch
///
/// Run detail is best-effort: every failure mode is a value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RunDetailOutcome {
    Found(RunDetail),
    Unavailable(UnavailableReason),
}

/// Why a run detail could not be obtained
#[derive(Debug, Clone, PartialEq)]
pub enum UnavailableReason {
    /// Upstream answered with a non-success status
    Status(u16),
    /// Request failed before a response arrived
    Transport(String),
    /// Response body was not a decodable run detail
    Malformed(String),
    /// Per-call time budget exceeded
    TimedOut,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Status(status) => write!(f, "upstream status {}", status),
            UnavailableReason::Transport(msg) => write!(f, "transport error: {}", msg),
            UnavailableReason::Malformed(msg) => write!(f, "malformed payload: {}", msg),
            UnavailableReason::TimedOut => f.write_str("timed out"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRosterSlot {
    character: RawCharacter,
    #[serde(default)]
    items: Option<RawItems>,
}

#[derive(Debug, Deserialize)]
struct RawCharacter {
    name: String,
    class: RawClass,
    spec: RawSpec,
    #[serde(default)]
    profile_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawClass {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct RawSpec {
    role: Role,
}

#[derive(Debug, Deserialize)]
struct RawItems {
    #[serde(default)]
    item_level_equipped: Option<f64>,
}

/// Decode a run-detail payload into a [`RunDetail`]
///
/// `run_id` is the id the detail was requested for. A missing
/// `keystone_run_id` in the payload falls back to it; a missing roster
/// yields a detail with no players.
pub fn parse_run_detail(run_id: u64, payload: &Value) -> Result<RunDetail, UnavailableReason> {
    let object = payload
        .as_object()
        .ok_or_else(|| UnavailableReason::Malformed("payload is not a JSON object".to_string()))?;

    let keystone_run_id = object
        .get("keystone_run_id")
        .and_then(Value::as_u64)
        .unwrap_or(run_id);

    let players: Vec<RosterPlayer> = object
        .get("roster")
        .and_then(Value::as_array)
        .map(|slots| {
            slots
                .iter()
                .enumerate()
                .filter_map(|(index, slot)| match parse_player(slot) {
                    Ok(player) => Some(player),
                    Err(e) => {
                        warn!(run_id, slot = index, error = %e, "Skipping unparsable roster entry");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let average_item_level = mean1(players.iter().filter_map(|p| p.item_level));

    Ok(RunDetail {
        run_id,
        keystone_run_id,
        players,
        average_item_level,
    })
}

/// Decode one roster slot
fn parse_player(slot: &Value) -> Result<RosterPlayer, serde_json::Error> {
    let raw = RawRosterSlot::deserialize(slot)?;

    let item_level = raw
        .items
        .and_then(|items| items.item_level_equipped)
        .filter(|level| level.is_finite() && *level >= 0.0)
        .map(round1);

    Ok(RosterPlayer {
        character_name: raw.character.name,
        character_class: raw.character.class.slug,
        character_role: raw.character.spec.role,
        profile_url: raw.character.profile_url.unwrap_or_default(),
        item_level,
    })
}
