//! Custom error pages.

use std::collections::BTreeMap;

use axum::http::StatusCode;

use crate::fallback::request::RequestState;
use crate::fallback::spa::SpaSupport;
use crate::fallback::Forward;

/// Status code → error page, plus an optional page for any other error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPageTable {
    pages: BTreeMap<u16, String>,
    default_page: Option<String>,
}

impl ErrorPageTable {
    pub fn new(pages: BTreeMap<u16, String>, default_page: Option<String>) -> Self {
        Self {
            pages,
            default_page,
        }
    }

    /// Page for the status: exact mapping first, then the default page.
    pub fn get(&self, status: StatusCode) -> Option<&str> {
        self.pages
            .get(&status.as_u16())
            .or(self.default_page.as_ref())
            .map(String::as_str)
    }

    pub fn pages(&self) -> &BTreeMap<u16, String> {
        &self.pages
    }

    pub fn default_page(&self) -> Option<&str> {
        self.default_page.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.default_page.is_none()
    }
}

/// Maps a failure status to the forward that handles it.
#[derive(Debug, Clone, Copy)]
pub struct ErrorPageResolver<'a> {
    table: &'a ErrorPageTable,
    spa: &'a SpaSupport,
}

impl<'a> ErrorPageResolver<'a> {
    pub fn new(table: &'a ErrorPageTable, spa: &'a SpaSupport) -> Self {
        Self { table, spa }
    }

    /// `Some` when the error is handled; `None` means the caller must send the
    /// raw status.
    pub fn resolve(&self, status: StatusCode, state: &RequestState) -> Option<Forward> {
        if status.as_u16() < 400 {
            return None;
        }
        if status == StatusCode::NOT_FOUND && self.spa.try_fallback(status, state) {
            return Some(Forward::SpaIndex);
        }
        let page = self.table.get(status)?;
        tracing::debug!(status = status.as_u16(), page = %page, uri = %state.uri(), "Forwarding to error page");
        Some(Forward::ErrorPage {
            page: page.to_string(),
            status,
        })
    }
}
