//! Per-run statistics
//!
//! Pure functions: no I/O, output depends only on the run summary, the run
//! detail map and the subject character's name.

use mplus_common::models::{Composition, EnrichedRun, Role, RunDetail, RunSummary};
use mplus_common::numeric::{mean1, millis_to_minutes, round1};
use std::collections::BTreeMap;

/// Enrich one run summary with timing and item-level statistics
///
/// The subject is matched against the roster by case-insensitive name. Only
/// strictly positive item levels count, for the subject and for the others.
pub fn enrich_run(
    run: &RunSummary,
    details: &BTreeMap<u64, RunDetail>,
    character_name: &str,
) -> EnrichedRun {
    let run_id = run.run_id();
    let detail = run_id.and_then(|id| details.get(&id));

    let (player_ilvl, other_avg_ilvl) = match detail {
        Some(detail) => item_levels(detail, character_name),
        None => (None, None),
    };
    let ilvl_delta = match (player_ilvl, other_avg_ilvl) {
        (Some(own), Some(others)) => Some(round1(own - others)),
        _ => None,
    };

    EnrichedRun {
        summary: run.clone(),
        run_id,
        time_diff_percent: time_diff_percent(run),
        clear_time_minutes: millis_to_minutes(run.clear_time_ms),
        par_time_minutes: millis_to_minutes(run.par_time_ms),
        player_ilvl,
        other_avg_ilvl,
        ilvl_delta,
        composition: detail.map(composition),
    }
}

/// Percentage deviation of clear time from par, one decimal
///
/// `None` for a non-positive par time, which makes the ratio undefined.
pub fn time_diff_percent(run: &RunSummary) -> Option<f64> {
    if run.par_time_ms <= 0 {
        tracing::warn!(
            dungeon = %run.dungeon,
            run_id = ?run.run_id(),
            par_time_ms = run.par_time_ms,
            "Non-positive par time, timing deviation left unset"
        );
        return None;
    }

    let par = run.par_time_ms as f64;
    Some(round1((run.clear_time_ms as f64 - par) / par * 100.0))
}

/// Subject's item level and the mean of the other valid item levels
fn item_levels(detail: &RunDetail, character_name: &str) -> (Option<f64>, Option<f64>) {
    let subject = character_name.to_lowercase();
    let mut own = None;
    let mut subject_seen = false;
    let mut others = Vec::with_capacity(detail.players.len());

    for player in &detail.players {
        let is_subject = player.character_name.to_lowercase() == subject;
        let level = player.item_level.filter(|level| *level > 0.0);

        if is_subject {
            // Repeated subject entries are ignored.
            if !subject_seen {
                subject_seen = true;
                own = level;
            }
        } else if let Some(level) = level {
            others.push(level);
        }
    }

    (own, mean1(others))
}

fn composition(detail: &RunDetail) -> Composition {
    detail.players.iter().fold(Composition::default(), |mut acc, player| {
        acc.classes.push(player.character_class.clone());
        match player.character_role {
            Role::Tank => acc.tanks += 1,
            Role::Healer => acc.healers += 1,
            Role::Dps => acc.dps += 1,
        }
        acc
    })
}
