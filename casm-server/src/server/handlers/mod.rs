pub mod compiler;
pub mod license;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    Json,
};

use crate::identity::{set_cookie_header, visitor_from_headers, VisitorId};
use crate::server::state::AppState;

const LANDING_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>CASM Playground</title></head>
<body>
<h1>CASM Playground</h1>
<p>POST your program as <code>{"code": "..."}</code> to <code>/compile</code>,
<code>/normalize</code> or <code>/emit</code>.</p>
</body>
</html>
"#;

/// GET / - Landing page; hands out an identity cookie to new visitors
pub async fn landing(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let cookie = &state.config().cookie;
    let mut response_headers = HeaderMap::new();

    if visitor_from_headers(&headers, &cookie.name).is_none() {
        let visitor = VisitorId::mint();
        tracing::debug!(%visitor, "minted visitor identity");
        if let Some(value) = set_cookie_header(&visitor, cookie) {
            response_headers.insert(header::SET_COOKIE, value);
        }
    }

    (response_headers, Html(LANDING_PAGE))
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
