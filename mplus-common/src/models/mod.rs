//! Data model shared between the upstream client, the enrichment pipeline
//! and the presentation layer
//!
//! Raw upstream records (`RunSummary`, `RunDetail`, `SeasonScore`,
//! `CharacterProfile`) are immutable once decoded. Derived records
//! (`EnrichedRun`, `BracketStat`, `CharacterResult`) are built functionally
//! from them and never mutated in place.

pub mod bracket;
pub mod character;
pub mod roster;
pub mod run;
pub mod score;

pub use bracket::{Bracket, BracketStat, BracketStats};
pub use character::{CharacterProfile, CharacterResult};
pub use roster::{Role, RosterPlayer, RunDetail};
pub use run::{Affix, Composition, EnrichedRun, RunSummary};
pub use score::{RoleScores, SeasonScore};

use serde::{Deserialize, Deserializer};

/// Decode an explicit JSON `null` as the type's default value
///
/// Used with `#[serde(default)]` so that both a missing field and a `null`
/// field decode to the default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
