//! Error fallback subsystem.
//!
//! # Data Flow
//! ```text
//! Request start:
//!     request.rs (RequestState) → spa.rs mark (PossibleRoute / no-cache root)
//!
//! Handler reported status >= 400:
//!     error_page.rs (ErrorPageResolver)
//!     → 404? spa.rs try_fallback → Forward::SpaIndex
//!     → ErrorPageTable (exact status, then default page) → Forward::ErrorPage
//!     → nothing matched → caller emits the raw status
//! ```
//!
//! # Design Decisions
//! - Decisions are pure; the dispatch engine performs the forward
//! - SPA fallback is consulted before the error page table, so it wins over a
//!   configured custom 404 page
//! - Redirects (3xx) and successes are never intercepted

pub mod error_page;
pub mod request;
pub mod spa;

pub use error_page::{ErrorPageResolver, ErrorPageTable};
pub use request::{RequestState, SpaRoute};
pub use spa::SpaSupport;

use axum::http::StatusCode;

/// Internal redirect decided by the fallback layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Forward {
    /// Serve the application index for a client-side route.
    SpaIndex,
    /// Render a configured error page, keeping the original status.
    ErrorPage { page: String, status: StatusCode },
}
