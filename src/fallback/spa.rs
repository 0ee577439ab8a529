//! SPA (HTML5 client routing) fallback.
//!
//! Relies on error handling only: a 404 on a marked request is turned into
//! an index response, everything else is left alone, so enabling SPA support
//! does not change normal processing.

use axum::http::StatusCode;
use regex::Regex;

use crate::fallback::request::{RequestState, SpaRoute};
use crate::routing::path::end_slash;

/// `Cache-Control` value applied to the index when SPA support is on.
pub const NO_CACHE: &str = "must-revalidate,no-cache,no-store";

/// SPA route tracking for one application.
#[derive(Debug, Clone)]
pub struct SpaSupport {
    enabled: bool,
    // application root, not the index page
    target: String,
    no_redirect: Regex,
}

impl SpaSupport {
    pub fn new(enabled: bool, target: impl Into<String>, no_redirect: Regex) -> Self {
        Self {
            enabled,
            target: target.into(),
            no_redirect,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn exclusion(&self) -> &str {
        self.no_redirect.as_str()
    }

    /// Mark the request as a possible SPA route, or, for the root, require
    /// the response to be uncacheable. No-op when disabled.
    pub fn mark(&self, state: &mut RequestState) {
        if !self.enabled {
            return;
        }
        if end_slash(state.path()) == self.target {
            state.no_cache = true;
        } else {
            state.spa_route = SpaRoute::PossibleRoute;
        }
    }

    /// True when the failed request must be answered with the index.
    ///
    /// Requires: SPA enabled, status exactly 404, request marked, client
    /// accepts HTML and the path (query excluded) does not match the
    /// exclusion pattern.
    pub fn try_fallback(&self, status: StatusCode, state: &RequestState) -> bool {
        let redirect = self.enabled
            && status == StatusCode::NOT_FOUND
            && state.is_possible_spa_route()
            && state.accepts_html()
            && !self.no_redirect.is_match(state.path());
        if redirect {
            tracing::debug!(uri = %state.uri(), "Perform SPA route redirect");
        }
        redirect
    }
}
