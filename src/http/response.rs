//! Response helpers.
//!
//! # Responsibilities
//! - Build bare status responses when no error page applies
//! - Mark responses as non-cacheable (index served for client-side routes)

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::fallback::spa::NO_CACHE;

/// Bare status response with the canonical reason as body.
pub fn raw_error(status: StatusCode) -> Response {
    (status, status.canonical_reason().unwrap_or_default()).into_response()
}

/// Forbid caching of a response.
pub fn apply_no_cache(response: &mut Response) {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
}
