//! Season resolution from run detail URLs

/// Prefix identifying a season path segment
pub const SEASON_PREFIX: &str = "season-";

/// Position of the season segment in a `/`-split run URL
const SEASON_SEGMENT_INDEX: usize = 3;

/// Season identifier for a run detail URL
///
/// Splits the URL on `/` and returns the fourth segment when it starts with
/// [`SEASON_PREFIX`]; otherwise returns `default_season`. Never fails.
pub fn resolve_season(url: &str, default_season: &str) -> String {
    match url.split('/').nth(SEASON_SEGMENT_INDEX) {
        Some(segment) if segment.starts_with(SEASON_PREFIX) => segment.to_string(),
        _ => default_season.to_string(),
    }
}
