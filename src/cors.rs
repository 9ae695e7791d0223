//! Cross-origin policy for the browser client.
//!
//! Requests without an `Origin` header (hardware pollers, curl) are always served.
//! Browser origins must either equal a configured literal or match a single-`*`
//! pattern such as `https://*.vercel.app`, which covers preview deployments.

use std::time::Duration;

use axum::http::request::Parts;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origins allowed when `CORS_ORIGINS` is not set.
const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "https://*.vercel.app",
];

/// One entry of the origin allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginRule {
    /// Origin must match exactly.
    Exact(String),
    /// Origin must start with `prefix`, end with `suffix`, and have a non-empty
    /// host label in between.
    Wildcard { prefix: String, suffix: String },
}

impl OriginRule {
    /// Parse a single allow-list entry. Entries containing `*` become patterns.
    #[must_use]
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }

        match entry.split_once('*') {
            Some((prefix, suffix)) => Some(Self::Wildcard {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            None => Some(Self::Exact(entry.to_string())),
        }
    }

    #[must_use]
    pub fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Exact(allowed) => origin == allowed,
            Self::Wildcard { prefix, suffix } => origin
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix(suffix.as_str()))
                .is_some_and(|middle| !middle.is_empty() && !middle.contains('/')),
        }
    }
}

/// The built-in allow-list.
#[must_use]
pub fn default_origins() -> Vec<OriginRule> {
    DEFAULT_ORIGINS
        .iter()
        .filter_map(|entry| OriginRule::parse(entry))
        .collect()
}

/// Parse a comma-separated `CORS_ORIGINS` value.
#[must_use]
pub fn parse_origins(raw: &str) -> Vec<OriginRule> {
    raw.split(',').filter_map(OriginRule::parse).collect()
}

/// Decide whether a request with the given `Origin` header may be served.
#[must_use]
pub fn is_allowed(rules: &[OriginRule], origin: Option<&str>) -> bool {
    origin.is_none_or(|origin| rules.iter().any(|rule| rule.matches(origin)))
}

/// Build the CORS middleware for the given allow-list.
///
/// A disallowed origin is still served, just without CORS headers, so the browser
/// rejects the response instead of the server rejecting the request.
#[must_use]
pub fn layer(rules: Vec<OriginRule>) -> CorsLayer {
    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
        origin
            .to_str()
            .is_ok_and(|origin| is_allowed(&rules, Some(origin)))
    });

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600))
}
