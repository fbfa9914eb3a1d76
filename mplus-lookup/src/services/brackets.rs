//! Difficulty bracket aggregation

use mplus_common::models::{Bracket, BracketStat, BracketStats, EnrichedRun};
use mplus_common::numeric::mean1;
use std::collections::{BTreeMap, HashSet};

/// Aggregate enriched runs into the four difficulty bands
///
/// Runs sharing a run id are counted once (first occurrence wins); runs
/// without an id are each counted. Levels below 1 are left out. Every band
/// is present in the result, empty ones with a zero count.
pub fn aggregate_brackets<'a, I>(runs: I) -> BracketStats
where
    I: IntoIterator<Item = &'a EnrichedRun>,
{
    let mut seen = HashSet::new();
    let mut grouped: BTreeMap<Bracket, Vec<&EnrichedRun>> =
        Bracket::ALL.iter().map(|b| (*b, Vec::new())).collect();

    for run in runs {
        if let Some(run_id) = run.run_id {
            if !seen.insert(run_id) {
                continue;
            }
        }
        if let Some(bracket) = Bracket::for_level(run.summary.mythic_level) {
            grouped.entry(bracket).or_default().push(run);
        }
    }

    grouped
        .into_iter()
        .map(|(bracket, runs)| {
            let stat = BracketStat {
                avg_time_diff_percent: mean1(runs.iter().filter_map(|r| r.time_diff_percent)),
                avg_ilvl_delta: mean1(runs.iter().filter_map(|r| r.ilvl_delta)),
                count: runs.len(),
            };
            (bracket, stat)
        })
        .collect()
}
