//! Per-request dispatch state.

use axum::http::{header, Request};

/// SPA route marker for a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpaRoute {
    #[default]
    Unmarked,
    /// Not the application root: a 404 may be a client-side route.
    PossibleRoute,
}

/// State carried through one request/response exchange.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    path: String,
    query: Option<String>,
    accept: Option<String>,
    /// SPA marker, set by `SpaSupport::mark`.
    pub spa_route: SpaRoute,
    /// Response must not be cached (index served for many routes).
    pub no_cache: bool,
}

impl RequestState {
    pub fn new(path: impl Into<String>, query: Option<String>) -> Self {
        Self {
            path: path.into(),
            query,
            ..Self::default()
        }
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        let uri = request.uri();
        let mut state = Self::new(uri.path(), uri.query().map(ToString::to_string));
        state.accept = request
            .headers()
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        state
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Path with the query string, as the client sent it.
    pub fn uri(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    /// True when the client accepts HTML (or did not say).
    pub fn accepts_html(&self) -> bool {
        self.accept
            .as_deref()
            .map_or(true, |accept| accept.contains("text/html"))
    }

    pub fn is_possible_spa_route(&self) -> bool {
        self.spa_route == SpaRoute::PossibleRoute
    }
}
