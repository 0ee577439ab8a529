//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, pretty or JSON)
//!     → report.rs (one summary per started application)
//!
//! Per request (http::server):
//!     → TraceLayer span carrying the x-request-id
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every log line of a request
//! - `RUST_LOG` wins over the configured level

pub mod logging;
pub mod report;
