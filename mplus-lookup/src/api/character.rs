//! Character lookup endpoints

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use mplus_common::models::CharacterResult;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Lookup form submission
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub region: String,
    pub realm: String,
    pub character: String,
}

/// GET /api/character/:region/:realm/:name
///
/// Returns the assembled character result as JSON. Upstream profile errors
/// are reported with the upstream status code.
pub async fn get_character(
    State(state): State<AppState>,
    Path((region, realm, name)): Path<(String, String, String)>,
) -> ApiResult<Json<CharacterResult>> {
    let result = state.assembler.assemble(&region, &realm, &name).await?;
    Ok(Json(result))
}

/// GET /character-lookup?region=..&realm=..&character=..
///
/// Normalises the form input and redirects to the character page.
pub async fn character_lookup(Query(query): Query<LookupQuery>) -> ApiResult<Redirect> {
    let region = query.region.trim().to_lowercase();
    let realm = normalize_realm(&query.realm);
    let character = query.character.trim();

    if region.is_empty() || realm.is_empty() || character.is_empty() {
        return Err(ApiError::BadRequest(
            "region, realm and character are required".to_string(),
        ));
    }

    let location = character_path(&region, &realm, character)?;
    Ok(Redirect::to(&location))
}

/// Realm slug: trimmed, lower-cased, whitespace runs replaced by `-`
pub fn normalize_realm(realm: &str) -> String {
    realm
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Percent-encoded `/character/{region}/{realm}/{name}` path
fn character_path(region: &str, realm: &str, name: &str) -> ApiResult<String> {
    let mut url = reqwest::Url::parse("http://localhost/")
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::Internal("cannot build character path".to_string()))?
        .clear()
        .extend(["character", region, realm, name]);
    Ok(url.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_realm() {
        assert_eq!(normalize_realm("  Area 52 "), "area-52");
        assert_eq!(normalize_realm("Moon   Guard"), "moon-guard");
        assert_eq!(normalize_realm("Illidan"), "illidan");
        assert_eq!(normalize_realm("   "), "");
    }

    #[test]
    fn test_character_path_encodes_segments() {
        assert_eq!(
            character_path("us", "area-52", "Thrall").unwrap(),
            "/character/us/area-52/Thrall"
        );
        assert_eq!(
            character_path("eu", "silvermoon", "Zoë").unwrap(),
            "/character/eu/silvermoon/Zo%C3%AB"
        );
    }
}
