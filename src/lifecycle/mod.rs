//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Register apps → Apply extensions → Start (freeze) → Engine
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C / SIGTERM / trigger → broadcast → Stop accepting → Drain → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any registration error is fatal
//! - Applications start before the listener binds (traffic only when ready)

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_engine, build_registry, start};
