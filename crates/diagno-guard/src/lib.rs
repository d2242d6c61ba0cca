//! # diagno-guard
//!
//! Decides whether a screen may be opened, given whether a session exists.
//!
//! Routes are declared in TOML and evaluated in order; the first matching
//! pattern wins. Protected routes without a session redirect to `/login`.
//! Paths no rule matches redirect to `/`.
//!
//! ```rust,ignore
//! use diagno_guard::RouteGuard;
//!
//! let guard = RouteGuard::default_routes()?;
//! let decision = guard.evaluate("/prediction/heart", session.is_authenticated());
//! ```

pub mod engine;
pub mod rule;

pub use engine::{GuardDecision, RouteGuard};
pub use rule::{Access, GuardConfig, RouteRule};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::{Access, GuardDecision, RouteGuard, RouteRule};

    fn redirect_target(decision: GuardDecision) -> String {
        match decision {
            GuardDecision::Redirect { to, .. } => to,
            GuardDecision::Allow => panic!("expected Redirect, got Allow"),
        }
    }

    // ── 1. default table ──────────────────────────────────────────────────────

    #[test]
    fn public_routes_open_without_session() {
        let guard = RouteGuard::default_routes().unwrap();
        for path in ["/", "/about", "/contact", "/home", "/login", "/signup"] {
            assert!(guard.evaluate(path, false).is_allowed(), "{path} should be public");
        }
    }

    #[test]
    fn protected_routes_redirect_to_login() {
        let guard = RouteGuard::default_routes().unwrap();
        for path in [
            "/dashboard",
            "/profile",
            "/reports",
            "/add-relative",
            "/disease-selection",
            "/prediction/heart",
        ] {
            assert_eq!(redirect_target(guard.evaluate(path, false)), "/login", "{path}");
            assert!(guard.evaluate(path, true).is_allowed(), "{path} with session");
        }
    }

    #[test]
    fn unmatched_path_goes_home() {
        let guard = RouteGuard::default_routes().unwrap();
        assert_eq!(redirect_target(guard.evaluate("/nowhere", true)), "/");
        assert_eq!(redirect_target(guard.evaluate("/prediction", true)), "/");
        assert_eq!(redirect_target(guard.evaluate("/prediction/heart/extra", true)), "/");
    }

    #[test]
    fn destination_follows_decision() {
        let guard = RouteGuard::default_routes().unwrap();
        let allowed = guard.evaluate("/about", false);
        assert_eq!(allowed.destination("/about"), "/about");

        let redirected = guard.evaluate("/reports", false);
        assert_eq!(redirected.destination("/reports"), "/login");
    }

    // ── 2. pattern matching ───────────────────────────────────────────────────

    #[test]
    fn param_segment_matches_any_single_segment() {
        let rule = RouteRule { path: "/prediction/:diseaseType".into(), access: Access::Authenticated };
        assert!(rule.matches("/prediction/diabetes"));
        assert!(rule.matches("/prediction/parkinsons/"));
        assert!(!rule.matches("/prediction/"));
        assert!(!rule.matches("/predictions/heart"));
    }

    #[test]
    fn query_and_trailing_slash_are_ignored() {
        let rule = RouteRule { path: "/reports".into(), access: Access::Authenticated };
        assert!(rule.matches("/reports/"));
        assert!(rule.matches("/reports?disease=heart"));
        assert!(rule.matches("/reports#latest"));
    }

    // ── 3. custom tables ──────────────────────────────────────────────────────

    #[test]
    fn first_matching_rule_wins() {
        let toml = r#"
            [[routes]]
            path = "/prediction/demo"
            access = "public"

            [[routes]]
            path = "/prediction/:diseaseType"
            access = "authenticated"
        "#;

        let guard = RouteGuard::from_toml_str(toml).unwrap();
        assert!(guard.evaluate("/prediction/demo", false).is_allowed());
        assert_eq!(redirect_target(guard.evaluate("/prediction/stroke", false)), "/login");
    }

    #[test]
    fn empty_table_redirects_everything_home() {
        let guard = RouteGuard::from_toml_str("routes = []").unwrap();
        assert_eq!(redirect_target(guard.evaluate("/", true)), "/");
    }

    #[test]
    fn unknown_access_level_is_config_error() {
        let toml = r#"
            [[routes]]
            path = "/admin"
            access = "admin-only"
        "#;
        let err = RouteGuard::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("failed to parse route table TOML"));
    }

    #[test]
    fn missing_route_file_is_config_error() {
        let result = RouteGuard::from_file(std::path::Path::new("/no/such/routes.toml"));
        assert!(result.is_err());
    }
}
