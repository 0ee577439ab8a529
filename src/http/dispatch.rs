//! Per-request dispatch engine.
//!
//! # Responsibilities
//! - Select the application owning the request (longest mount wins)
//! - Mark SPA candidates, classify the request and hand it to the asset or
//!   view collaborator
//! - Intercept error statuses and forward to the SPA index or an error page
//!
//! # Design Decisions
//! - Forwarded requests reuse the original request head without range and
//!   conditional headers, so error pages are always sent in full
//! - Error pages keep the original status; when the error page itself fails
//!   the original status is sent bare (no second forward)
//! - I/O failures while forwarding surface as `DispatchError::RedirectFailed`

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, request::Parts, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::app::{AppSet, Application};
use crate::fallback::{Forward, RequestState};
use crate::http::asset::AssetServer;
use crate::http::response::{apply_no_cache, raw_error};
use crate::http::view::{ViewError, ViewRenderer, ViewRequest};
use crate::locations::ResourceResolver;
use crate::routing::Classification;

/// Headers dropped from forwarded requests.
const FORWARD_STRIPPED: [header::HeaderName; 6] = [
    header::RANGE,
    header::IF_RANGE,
    header::IF_MATCH,
    header::IF_NONE_MATCH,
    header::IF_MODIFIED_SINCE,
    header::IF_UNMODIFIED_SINCE,
];

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to perform {what} redirect for '{uri}': {source}")]
    RedirectFailed {
        what: &'static str,
        uri: String,
        #[source]
        source: std::io::Error,
    },
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Dispatch failed");
        raw_error(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Result of handing a request to a collaborator.
enum Outcome {
    Done(Response),
    Failed(StatusCode),
}

/// Dispatches requests to the started applications.
pub struct DispatchEngine {
    apps: AppSet,
    assets: Arc<dyn AssetServer>,
    views: Arc<dyn ViewRenderer>,
    resolver: ResourceResolver,
}

impl DispatchEngine {
    pub fn new(apps: AppSet, assets: Arc<dyn AssetServer>, views: Arc<dyn ViewRenderer>) -> Self {
        Self {
            apps,
            assets,
            views,
            resolver: ResourceResolver::filesystem(),
        }
    }

    /// Replace the resource resolver (non-filesystem location probes).
    pub fn with_resolver(mut self, resolver: ResourceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn apps(&self) -> &AppSet {
        &self.apps
    }

    /// Handle one request end to end.
    pub async fn dispatch(&self, request: Request<Body>) -> Result<Response, DispatchError> {
        let Some(app) = self.apps.find(request.uri().path()) else {
            tracing::debug!(path = %request.uri().path(), "No server pages application mounted");
            return Ok(raw_error(StatusCode::NOT_FOUND));
        };

        let mut state = RequestState::from_request(&request);
        app.spa().mark(&mut state);

        let classification = app
            .classifier()
            .classify(state.path(), |name| self.views.is_renderable(name));
        tracing::debug!(app = %app.name(), uri = %state.uri(), ?classification, "Dispatching request");

        let (parts, body) = request.into_parts();
        let outcome = match &classification {
            Classification::Asset { path } => {
                self.serve_asset(app, path, Request::from_parts(parts.clone(), body))
                    .await
            }
            Classification::DirectTemplate { page } | Classification::DynamicView { page } => {
                match self.render_view(app, page, &parts, None).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!(app = %app.name(), page = %page, error = %e, "View failed");
                        Outcome::Failed(StatusCode::INTERNAL_SERVER_ERROR)
                    }
                }
            }
        };

        match outcome {
            Outcome::Done(mut response) => {
                if state.no_cache {
                    apply_no_cache(&mut response);
                }
                Ok(response)
            }
            Outcome::Failed(status) => self.handle_error(app, status, &state, &parts).await,
        }
    }

    async fn handle_error(
        &self,
        app: &Application,
        status: StatusCode,
        state: &RequestState,
        parts: &Parts,
    ) -> Result<Response, DispatchError> {
        match app.error_resolver().resolve(status, state) {
            None => Ok(raw_error(status)),
            Some(Forward::SpaIndex) => {
                let mut response = self.forward_index(app, parts).await.map_err(|source| {
                    DispatchError::RedirectFailed {
                        what: "SPA",
                        uri: state.uri(),
                        source,
                    }
                })?;
                apply_no_cache(&mut response);
                Ok(response)
            }
            Some(Forward::ErrorPage { page, status }) => {
                self.forward_error_page(app, &page, status, parts)
                    .await
                    .map_err(|source| DispatchError::RedirectFailed {
                        what: "error page",
                        uri: state.uri(),
                        source,
                    })
            }
        }
    }

    async fn forward_index(&self, app: &Application, parts: &Parts) -> std::io::Result<Response> {
        let classification = app
            .classifier()
            .classify_page("", |name| self.views.is_renderable(name));
        match self.forward(app, &classification, parts, None).await? {
            Outcome::Done(response) => Ok(response),
            Outcome::Failed(status) => {
                tracing::warn!(app = %app.name(), status = %status, "Index failed for SPA route");
                Ok(raw_error(status))
            }
        }
    }

    async fn forward_error_page(
        &self,
        app: &Application,
        page: &str,
        status: StatusCode,
        parts: &Parts,
    ) -> std::io::Result<Response> {
        let classification = app
            .classifier()
            .classify_page(page, |name| self.views.is_renderable(name));
        match self.forward(app, &classification, parts, Some(status)).await? {
            Outcome::Done(mut response) => {
                *response.status_mut() = status;
                Ok(response)
            }
            Outcome::Failed(failed) => {
                tracing::warn!(
                    app = %app.name(),
                    page = %page,
                    status = %status,
                    error_page_status = %failed,
                    "Error page failed, sending bare status"
                );
                Ok(raw_error(status))
            }
        }
    }

    async fn forward(
        &self,
        app: &Application,
        classification: &Classification,
        parts: &Parts,
        status: Option<StatusCode>,
    ) -> std::io::Result<Outcome> {
        match classification {
            Classification::Asset { path } => {
                Ok(self.serve_asset(app, path, forward_request(parts)).await)
            }
            Classification::DirectTemplate { page } | Classification::DynamicView { page } => {
                self.render_view(app, page, parts, status).await
            }
        }
    }

    async fn serve_asset(&self, app: &Application, path: &str, request: Request<Body>) -> Outcome {
        let Some(location) = app.resolve_asset(&self.resolver, path) else {
            tracing::debug!(app = %app.name(), path = %path, "Asset not found in any location");
            return Outcome::Failed(StatusCode::NOT_FOUND);
        };
        let response = self.assets.serve(&location, request).await;
        if response.status().is_client_error() || response.status().is_server_error() {
            Outcome::Failed(response.status())
        } else {
            Outcome::Done(response)
        }
    }

    async fn render_view(
        &self,
        app: &Application,
        page: &str,
        parts: &Parts,
        status: Option<StatusCode>,
    ) -> std::io::Result<Outcome> {
        let view = ViewRequest {
            app,
            resolver: &self.resolver,
            request: parts,
            route: app.view_route(page),
            page,
            status,
        };
        match self.views.render(view).await {
            // error pages legitimately carry an error status
            Ok(response) if status.is_none() && response.status().as_u16() >= 400 => {
                Ok(Outcome::Failed(response.status()))
            }
            Ok(response) => Ok(Outcome::Done(response)),
            Err(ViewError::Status(failed)) => Ok(Outcome::Failed(failed)),
            Err(ViewError::Io(e)) => Err(e),
        }
    }
}

/// Bodiless GET (or HEAD) copy of the original request head.
fn forward_request(parts: &Parts) -> Request<Body> {
    let mut parts = parts.clone();
    if parts.method != Method::HEAD {
        parts.method = Method::GET;
    }
    for name in &FORWARD_STRIPPED {
        parts.headers.remove(name);
    }
    Request::from_parts(parts, Body::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppBuilder;
    use async_trait::async_trait;

    /// Answers every asset request with a fixed status and the location.
    struct StubAssets(StatusCode);

    #[async_trait]
    impl AssetServer for StubAssets {
        async fn serve(&self, location: &str, _request: Request<Body>) -> Response {
            (self.0, location.to_string()).into_response()
        }
    }

    /// Renders `.ftl` pages that exist in the resolver, fails the rest.
    struct StubViews;

    #[async_trait]
    impl ViewRenderer for StubViews {
        fn is_renderable(&self, name: &str) -> bool {
            name.ends_with(".ftl")
        }

        async fn render(&self, view: ViewRequest<'_>) -> Result<Response, ViewError> {
            match view.page {
                "broken" => Err(ViewError::Io(std::io::Error::other("disk gone"))),
                "boom" => Err(ViewError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
                page if page.ends_with(".ftl") => {
                    Ok((view.status.unwrap_or(StatusCode::OK), view.route).into_response())
                }
                _ => Err(ViewError::Status(StatusCode::NOT_FOUND)),
            }
        }
    }

    fn engine(builder: AppBuilder, existing: &'static [&'static str], assets: StatusCode) -> DispatchEngine {
        let apps = AppSet::new(vec![Arc::new(builder.build(None).unwrap())]);
        let resolver = ResourceResolver::new(Arc::new(move |location: &str| {
            existing.iter().any(|e| *e == location)
        }));
        DispatchEngine::new(apps, Arc::new(StubAssets(assets)), Arc::new(StubViews)).with_resolver(resolver)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_unmounted_path_is_404() {
        let engine = engine(AppBuilder::new("app", "/app", "web"), &[], StatusCode::OK);
        let response = engine.dispatch(get("/other")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_spa_route_served_index_without_cache() {
        let engine = engine(
            AppBuilder::new("app", "/app", "web").spa(true),
            &["web/index.html"],
            StatusCode::OK,
        );
        let response = engine.dispatch(get("/app/users/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], crate::fallback::spa::NO_CACHE);
    }

    #[tokio::test]
    async fn test_spa_exclusion_keeps_404() {
        let engine = engine(
            AppBuilder::new("app", "/app", "web").spa(true),
            &["web/index.html"],
            StatusCode::OK,
        );
        let response = engine.dispatch(get("/app/missing.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_error_page_keeps_status() {
        let engine = engine(
            AppBuilder::new("app", "/app", "web").error_page(500, "error.ftl"),
            &[],
            StatusCode::OK,
        );
        let response = engine.dispatch(get("/app/boom")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_failing_error_page_sends_bare_status() {
        let engine = engine(
            AppBuilder::new("app", "/app", "web").default_error_page("missing.html"),
            &[],
            StatusCode::OK,
        );
        let response = engine.dispatch(get("/app/nothing.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_asset_error_status_intercepted() {
        let engine = engine(
            AppBuilder::new("app", "/app", "web").error_page(403, "denied.ftl"),
            &["web/secret.txt"],
            StatusCode::FORBIDDEN,
        );
        let response = engine.dispatch(get("/app/secret.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_redirect_failure_reported() {
        let engine = engine(
            AppBuilder::new("app", "/app", "web").error_page(404, "broken"),
            &[],
            StatusCode::OK,
        );
        let err = engine.dispatch(get("/app/unknown")).await.unwrap_err();
        assert!(matches!(err, DispatchError::RedirectFailed { what: "error page", .. }));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_forward_request_strips_conditionals() {
        let (parts, _) = Request::builder()
            .method(Method::POST)
            .header(header::RANGE, "bytes=0-1")
            .header(header::IF_NONE_MATCH, "\"abc\"")
            .header(header::ACCEPT, "text/html")
            .body(())
            .unwrap()
            .into_parts();
        let request = forward_request(&parts);
        assert_eq!(request.method(), Method::GET);
        assert!(request.headers().get(header::RANGE).is_none());
        assert!(request.headers().get(header::IF_NONE_MATCH).is_none());
        assert_eq!(request.headers()[header::ACCEPT], "text/html");
    }
}
