//! UI serving routes
//!
//! Static pages; the character page renders itself from the JSON endpoint.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../../ui/index.html");
const CHARACTER_HTML: &str = include_str!("../../ui/character.html");
const APP_JS: &str = include_str!("../../ui/app.js");

/// GET /
///
/// Serves the lookup form
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /character/:region/:realm/:name
///
/// Serves the character page shell; the script reads region, realm and name
/// from the URL path.
pub async fn serve_character_page() -> Html<&'static str> {
    Html(CHARACTER_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}
