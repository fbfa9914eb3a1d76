//! Character data assembly
//!
//! Entry point used by the HTTP layer: fetch profile, fan out run details,
//! enrich both run lists, aggregate brackets, pick the season score.

use mplus_common::config::LookupConfig;
use mplus_common::models::{CharacterResult, EnrichedRun, RunSummary, SeasonScore};
use std::sync::Arc;
use tracing::info;

use super::brackets::aggregate_brackets;
use super::detail_orchestrator::{unique_requests, DetailOrchestrator};
use super::enrichment::enrich_run;
use super::upstream::UpstreamApi;
use crate::error::LookupError;

/// Builds [`CharacterResult`]s from live upstream data
pub struct CharacterAssembler {
    api: Arc<dyn UpstreamApi>,
    orchestrator: DetailOrchestrator,
    current_season: String,
}

impl CharacterAssembler {
    pub fn new(api: Arc<dyn UpstreamApi>, config: &LookupConfig) -> Self {
        let orchestrator = DetailOrchestrator::new(Arc::clone(&api), config.default_season.clone())
            .with_timeout(config.detail_timeout());

        Self {
            api,
            orchestrator,
            current_season: config.current_season.clone(),
        }
    }

    /// Assemble the lookup result for one character
    ///
    /// Only a failed profile fetch is an error. Run details that cannot be
    /// fetched leave their runs with unset item-level fields.
    pub async fn assemble(
        &self,
        region: &str,
        realm: &str,
        name: &str,
    ) -> Result<CharacterResult, LookupError> {
        let profile = self.api.character_profile(region, realm, name).await?;

        let recent = &profile.mythic_plus_recent_runs;
        let best = &profile.mythic_plus_best_runs;

        let requests = unique_requests(recent.iter().chain(best.iter()));
        let run_details = self.orchestrator.fetch_all(&requests).await;

        let subject = if profile.name.is_empty() { name } else { profile.name.as_str() };
        let enrich = |runs: &[RunSummary]| -> Vec<EnrichedRun> {
            runs.iter().map(|run| enrich_run(run, &run_details, subject)).collect()
        };
        let recent_runs = enrich(recent.as_slice());
        let best_runs = enrich(best.as_slice());

        // Recent runs first so they win on duplicate run ids.
        let bracket_stats = aggregate_brackets(recent_runs.iter().chain(best_runs.iter()));

        let season_score = resolve_season_score(
            &profile.mythic_plus_scores_by_season,
            &self.current_season,
            best,
        );

        info!(
            name = %subject,
            recent_runs = recent_runs.len(),
            best_runs = best_runs.len(),
            run_details = run_details.len(),
            season = %season_score.season,
            "Assembled character result"
        );

        Ok(CharacterResult {
            name: subject.to_string(),
            race: profile.race.clone(),
            class_name: profile.class_name.clone(),
            active_spec_name: profile.active_spec_name.clone(),
            active_spec_role: profile.active_spec_role.clone(),
            region: non_empty_or(&profile.region, region),
            realm: non_empty_or(&profile.realm, realm),
            profile_url: profile.profile_url.clone(),
            thumbnail_url: profile.thumbnail_url.clone(),
            season_score,
            recent_runs,
            best_runs,
            run_details,
            bracket_stats,
        })
    }
}

/// Pick the season score to report
///
/// Order of preference: the entry for `current_season`, the first entry,
/// then a synthesized score summing the best-run scores.
pub fn resolve_season_score(
    entries: &[SeasonScore],
    current_season: &str,
    best_runs: &[RunSummary],
) -> SeasonScore {
    entries
        .iter()
        .find(|entry| entry.season == current_season)
        .or_else(|| entries.first())
        .cloned()
        .unwrap_or_else(|| {
            SeasonScore::synthesized(current_season, best_runs.iter().map(|run| run.score))
        })
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{MockDetail, MockUpstream};
    use crate::services::run_detail::UnavailableReason;
    use chrono::Utc;
    use mplus_common::models::{
        Bracket, CharacterProfile, RoleScores, Role, RosterPlayer, RunDetail,
    };

    fn run(run_id: u64, level: i32, clear: i64, par: i64, score: f64) -> RunSummary {
        RunSummary {
            dungeon: "Priory of the Sacred Flame".to_string(),
            short_name: "PSF".to_string(),
            mythic_level: level,
            completed_at: Utc::now(),
            clear_time_ms: clear,
            par_time_ms: par,
            num_keystone_upgrades: 1,
            score,
            url: format!("https://raider.io/mythic-plus-runs/season-tww-2/{}-psf", run_id),
            keystone_run_id: Some(run_id),
            affixes: Vec::new(),
        }
    }

    fn season(name: &str, all: f64) -> SeasonScore {
        SeasonScore {
            season: name.to_string(),
            scores: RoleScores {
                all,
                dps: all,
                ..RoleScores::default()
            },
        }
    }

    fn roster(run_id: u64, levels: &[(&str, f64)]) -> RunDetail {
        RunDetail {
            run_id,
            keystone_run_id: run_id,
            players: levels
                .iter()
                .map(|(name, level)| RosterPlayer {
                    character_name: name.to_string(),
                    character_class: "paladin".to_string(),
                    character_role: Role::Dps,
                    profile_url: String::new(),
                    item_level: Some(*level),
                })
                .collect(),
            average_item_level: None,
        }
    }

    fn config() -> LookupConfig {
        LookupConfig {
            current_season: "season-tww-2".to_string(),
            ..LookupConfig::default()
        }
    }

    #[test]
    fn test_season_score_prefers_current() {
        let entries = vec![season("season-tww-1", 1000.0), season("season-tww-2", 2500.0)];
        let score = resolve_season_score(&entries, "season-tww-2", &[]);
        assert_eq!(score.scores.all, 2500.0);
    }

    #[test]
    fn test_season_score_falls_back_to_first() {
        let entries = vec![season("season-tww-1", 1000.0), season("season-df-4", 900.0)];
        let score = resolve_season_score(&entries, "season-tww-2", &[]);
        assert_eq!(score.season, "season-tww-1");
    }

    #[test]
    fn test_season_score_synthesized_from_best_runs() {
        let best = vec![run(1, 10, 1, 2, 250.5), run(2, 11, 1, 2, 260.0)];
        let score = resolve_season_score(&[], "season-tww-2", &best);
        assert_eq!(score.season, "season-tww-2");
        assert_eq!(score.scores.all, 510.5);
        assert_eq!(score.scores.dps, 0.0);
        assert_eq!(score.scores.healer, 0.0);
        assert_eq!(score.scores.tank, 0.0);
    }

    #[tokio::test]
    async fn test_assemble_full_pipeline() {
        let profile = CharacterProfile {
            name: "Subject".to_string(),
            class_name: "Paladin".to_string(),
            mythic_plus_recent_runs: vec![run(1, 10, 500_000, 600_000, 200.0), run(2, 5, 700_000, 600_000, 0.0)],
            mythic_plus_best_runs: vec![run(1, 10, 500_000, 600_000, 200.0), run(3, 2, 600_000, 600_000, 90.0)],
            mythic_plus_scores_by_season: vec![season("season-tww-2", 2900.0)],
            ..CharacterProfile::default()
        };
        let mock = MockUpstream::new(profile)
            .with_detail(1, MockDetail::Found(roster(1, &[("subject", 620.0), ("A", 630.0), ("B", 640.0)])))
            .with_detail(2, MockDetail::Unavailable(UnavailableReason::Status(500)))
            .with_detail(3, MockDetail::Found(roster(3, &[("Subject", 600.0), ("A", 590.0)])));

        let assembler = CharacterAssembler::new(Arc::new(mock), &config());
        let result = assembler.assemble("us", "illidan", "subject").await.unwrap();

        assert_eq!(result.name, "Subject");
        assert_eq!(result.region, "us");
        assert_eq!(result.realm, "illidan");
        assert_eq!(result.season_score.scores.all, 2900.0);
        assert_eq!(result.run_details.keys().copied().collect::<Vec<_>>(), vec![1, 3]);

        let first = &result.recent_runs[0];
        assert_eq!(first.time_diff_percent, Some(-16.7));
        assert_eq!(first.other_avg_ilvl, Some(635.0));
        assert_eq!(first.ilvl_delta, Some(-15.0));

        let failed = &result.recent_runs[1];
        assert_eq!(failed.time_diff_percent, Some(16.7));
        assert_eq!(failed.player_ilvl, None);
        assert_eq!(failed.other_avg_ilvl, None);
        assert_eq!(failed.ilvl_delta, None);

        assert_eq!(result.best_runs[1].ilvl_delta, Some(10.0));

        // Run 1 appears in both lists but is counted once.
        assert_eq!(result.bracket_stats[&Bracket::Top].count, 1);
        assert_eq!(result.bracket_stats[&Bracket::Mid].count, 1);
        assert_eq!(result.bracket_stats[&Bracket::Low].count, 1);
        assert_eq!(result.bracket_stats[&Bracket::High].count, 0);
    }

    #[tokio::test]
    async fn test_profile_failure_is_fatal() {
        let assembler = CharacterAssembler::new(Arc::new(MockUpstream::failing(404)), &config());
        let err = assembler.assemble("us", "illidan", "ghost").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_empty_profile() {
        let profile = CharacterProfile {
            name: "Fresh".to_string(),
            ..CharacterProfile::default()
        };
        let assembler = CharacterAssembler::new(Arc::new(MockUpstream::new(profile)), &config());
        let result = assembler.assemble("eu", "silvermoon", "fresh").await.unwrap();

        assert!(result.recent_runs.is_empty());
        assert!(result.run_details.is_empty());
        assert_eq!(result.season_score.scores.all, 0.0);
        assert_eq!(result.bracket_stats.len(), 4);
    }
}
