//! Concurrent run-detail fan-out
//!
//! One task per unique run id, all in flight at once. Each task is spawned
//! on its own so a panic or cancellation shows up as a `JoinError` for that
//! run only. The join waits for every task and keeps what succeeded.

use mplus_common::models::{RunDetail, RunSummary};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::run_detail::{RunDetailOutcome, UnavailableReason};
use super::season::resolve_season;
use super::upstream::UpstreamApi;

/// One run to fetch detail for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub run_id: u64,
    /// Run detail page URL, used for season resolution
    pub url: String,
}

/// Collect unique detail requests across run lists
///
/// First occurrence of a run id wins. Runs without a resolvable id are
/// skipped.
pub fn unique_requests<'a, I>(runs: I) -> Vec<DetailRequest>
where
    I: IntoIterator<Item = &'a RunSummary>,
{
    let mut seen = HashSet::new();
    runs.into_iter()
        .filter_map(|run| {
            let run_id = run.run_id()?;
            seen.insert(run_id).then(|| DetailRequest {
                run_id,
                url: run.url.clone(),
            })
        })
        .collect()
}

/// Fetches run details concurrently with per-run failure isolation
pub struct DetailOrchestrator {
    api: Arc<dyn UpstreamApi>,
    default_season: String,
    per_call_timeout: Option<Duration>,
}

impl DetailOrchestrator {
    pub fn new(api: Arc<dyn UpstreamApi>, default_season: impl Into<String>) -> Self {
        Self {
            api,
            default_season: default_season.into(),
            per_call_timeout: None,
        }
    }

    /// Abandon any single fetch that runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.per_call_timeout = timeout;
        self
    }

    /// Fetch details for all requests
    ///
    /// Returns only the runs whose detail was obtained. Requests repeating
    /// an earlier run id are ignored.
    pub async fn fetch_all(&self, requests: &[DetailRequest]) -> BTreeMap<u64, RunDetail> {
        let mut join_set = JoinSet::new();
        let mut seen = HashSet::new();

        for request in requests {
            if !seen.insert(request.run_id) {
                continue;
            }

            let api = Arc::clone(&self.api);
            let run_id = request.run_id;
            let season = resolve_season(&request.url, &self.default_season);
            let per_call_timeout = self.per_call_timeout;

            join_set.spawn(async move {
                let fetch = api.run_details(run_id, &season);
                let outcome = match per_call_timeout {
                    Some(limit) => tokio::time::timeout(limit, fetch)
                        .await
                        .unwrap_or(RunDetailOutcome::Unavailable(UnavailableReason::TimedOut)),
                    None => fetch.await,
                };
                (run_id, season, outcome)
            });
        }

        let requested = seen.len();
        let mut details = BTreeMap::new();
        let mut unavailable = 0usize;
        let mut failed_tasks = 0usize;

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((run_id, _season, RunDetailOutcome::Found(detail))) => {
                    details.insert(run_id, detail);
                }
                Ok((run_id, season, RunDetailOutcome::Unavailable(reason))) => {
                    unavailable += 1;
                    debug!(run_id, season = %season, reason = %reason, "Run detail unavailable, continuing");
                }
                Err(e) => {
                    failed_tasks += 1;
                    warn!(error = %e, "Run detail task failed");
                }
            }
        }

        info!(
            requested,
            found = details.len(),
            unavailable,
            failed_tasks,
            "Run detail fan-out complete"
        );

        details
    }
}
