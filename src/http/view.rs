//! View (template / rest) collaborator.
//!
//! # Responsibilities
//! - Tell the classifier which file names are templates
//! - Render a logical page for an application, optionally carrying the
//!   error status an error page is rendered for
//!
//! # Design Decisions
//! - `ViewError::Status` means "nobody can handle this page" and feeds the
//!   error page resolver; `ViewError::Io` is a broken collaborator

use std::path::Path;

use async_trait::async_trait;
use axum::http::{header, request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::app::builder::normalize_extension;
use crate::app::Application;
use crate::locations::ResourceResolver;

/// View rendering failure.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("view failed with status {0}")]
    Status(StatusCode),
    #[error("view I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a renderer gets for one page.
#[derive(Debug)]
pub struct ViewRequest<'a> {
    pub app: &'a Application,
    pub resolver: &'a ResourceResolver,
    pub request: &'a Parts,
    /// Internal rest route (`/{prefix}/{page}`).
    pub route: String,
    /// Logical page relative to the mount.
    pub page: &'a str,
    /// Set when rendering an error page.
    pub status: Option<StatusCode>,
}

#[async_trait]
pub trait ViewRenderer: Send + Sync {
    /// True when `name` is a template this renderer handles directly.
    fn is_renderable(&self, name: &str) -> bool;

    async fn render(&self, view: ViewRequest<'_>) -> Result<Response, ViewError>;
}

/// Serves template files from the application's asset locations as HTML.
///
/// Pages without a template extension have no handler and yield 404.
#[derive(Debug, Clone)]
pub struct FileViewRenderer {
    extensions: Vec<String>,
}

impl FileViewRenderer {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| normalize_extension(&e.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl ViewRenderer for FileViewRenderer {
    fn is_renderable(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|known| known.eq_ignore_ascii_case(e)))
    }

    async fn render(&self, view: ViewRequest<'_>) -> Result<Response, ViewError> {
        if !self.is_renderable(view.page) {
            tracing::debug!(app = %view.app.name(), route = %view.route, "No view handler for route");
            return Err(ViewError::Status(StatusCode::NOT_FOUND));
        }
        let location = view
            .resolver
            .resolve_or_fail(view.page, view.app.assets())
            .map_err(|_| ViewError::Status(StatusCode::NOT_FOUND))?;
        let content = tokio::fs::read(&location).await?;

        tracing::debug!(route = %view.route, template = %location, "Rendering template");
        Ok((
            view.status.unwrap_or(StatusCode::OK),
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            content,
        )
            .into_response())
    }
}
