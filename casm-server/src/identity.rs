//! Anonymous visitor identity, carried in a long-lived cookie.
//!
//! The server never learns who a visitor is. It mints a random token on the first page load and
//! treats whatever token comes back as an opaque key into the [usage ledger](crate::usage).

use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::CookieConfig;

/// An opaque, stable token identifying one visitor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VisitorId(String);

impl VisitorId {
    /// Mint a fresh identity.
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VisitorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find the identity cookie among the request's `Cookie` headers. Empty values count as absent.
pub fn visitor_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<VisitorId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
        .map(|value| VisitorId(value.to_string()))
}

/// The `Set-Cookie` value that stores `visitor` in the browser.
pub fn set_cookie_header(visitor: &VisitorId, config: &CookieConfig) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        config.name, visitor, config.max_age_secs
    ))
    .ok()
}
