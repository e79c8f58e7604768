//! Login flow and navigation routes.
//!
//! # Responsibility
//! - Map an entered access code to a navigation decision.
//! - Parse and resolve the two-route navigation surface.
//!
//! # Invariants
//! - A rejected login never yields a navigation target.
//! - Unknown paths and unknown community ids resolve to the login route.

use crate::directory::Directory;
use crate::model::community::Community;
use log::info;
use std::fmt::{Display, Formatter};

/// Fixed user-facing message for a rejected access code.
pub const INVALID_CODE_MESSAGE: &str = "Neteisingas prisijungimo kodas. Bandykite dar kartą.";

const COMMUNITY_ROUTE_PREFIX: &str = "/community/";

/// Navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Entry view (`/`).
    Login,
    /// Directory view of one community (`/community/<id>`).
    Community(String),
}

impl Route {
    /// Parses a path; anything unrecognized redirects to [`Route::Login`].
    ///
    /// One trailing `/` is ignored, so `/community/vka/` opens `vka`.
    pub fn parse(path: &str) -> Self {
        let path = path.strip_suffix('/').unwrap_or(path);
        match path.strip_prefix(COMMUNITY_ROUTE_PREFIX) {
            Some(id) if !id.is_empty() && !id.contains('/') => Self::Community(id.to_string()),
            _ => Self::Login,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Community(id) => format!("{COMMUNITY_ROUTE_PREFIX}{id}"),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Result of resolving a route against the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    Login,
    Directory(&'a Community),
}

/// Resolves a route; an unknown community id falls back to the login screen.
pub fn resolve_route<'a>(directory: &'a Directory, route: &Route) -> Screen<'a> {
    match route {
        Route::Login => Screen::Login,
        Route::Community(id) => directory
            .find_community_by_id(id)
            .map_or(Screen::Login, Screen::Directory),
    }
}

/// Outcome of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Navigate(Route),
    Rejected { message: &'static str },
}

/// Attempts a login with a user-entered access code.
///
/// The code is trimmed before the exact-match lookup.
pub fn attempt_login(directory: &Directory, code: &str) -> LoginOutcome {
    match directory.find_community_by_code(code.trim()) {
        Some(community) => {
            info!(
                "event=login module=session status=ok community_id={}",
                community.id
            );
            LoginOutcome::Navigate(Route::Community(community.id.clone()))
        }
        None => {
            info!("event=login module=session status=rejected");
            LoginOutcome::Rejected {
                message: INVALID_CODE_MESSAGE,
            }
        }
    }
}

/// Leaves the directory view. Per-session view state is dropped by the caller.
pub fn logout() -> Route {
    Route::Login
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn parses_community_route() {
        assert_eq!(
            Route::parse("/community/vka"),
            Route::Community("vka".to_string())
        );
        assert_eq!(Route::Community("vka".to_string()).path(), "/community/vka");
    }

    #[test]
    fn single_trailing_slash_is_ignored() {
        assert_eq!(
            Route::parse("/community/vka/"),
            Route::Community("vka".to_string())
        );
        assert_eq!(Route::parse("/community/vka//"), Route::Login);
    }

    #[test]
    fn unmatched_paths_redirect_to_login() {
        for path in [
            "/",
            "",
            "/community/",
            "/community//",
            "/community/a/b",
            "/other",
            "community/vka",
        ] {
            assert_eq!(Route::parse(path), Route::Login, "path `{path}`");
        }
    }
}
