//! Route rule types and the TOML schema.
//!
//! A `GuardConfig` holds an ordered list of `RouteRule`s. The first rule
//! whose pattern matches the requested path decides its access level.

use serde::{Deserialize, Serialize};

/// Who may open a route.
///
/// ```toml
/// access = "public"
/// access = "authenticated"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    Public,
    Authenticated,
}

/// One entry of the route table.
///
/// `path` is a `/`-separated pattern. A segment starting with `:` matches
/// any single non-empty segment (`/prediction/:diseaseType`). Everything
/// else matches exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub path: String,
    pub access: Access,
}

impl RouteRule {
    pub fn matches(&self, path: &str) -> bool {
        let pattern: Vec<&str> = segments(&self.path).collect();
        let actual: Vec<&str> = segments(path).collect();

        pattern.len() == actual.len()
            && pattern
                .iter()
                .zip(&actual)
                .all(|(p, a)| p.starts_with(':') || p == a)
    }
}

/// Non-empty path segments, ignoring any query string or fragment.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty())
}

/// The top-level TOML document.
///
/// ```toml
/// [[routes]]
/// path = "/dashboard"
/// access = "authenticated"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    pub routes: Vec<RouteRule>,
}
