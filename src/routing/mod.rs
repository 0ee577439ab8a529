//! Request classification subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request URI (path + query)
//!     → path.rs (normalize, strip mount)
//!     → classifier.rs (file candidate? known template?)
//!     → Asset | DirectTemplate | DynamicView
//! ```
//!
//! # Design Decisions
//! - Classification is pure: no I/O, existence is checked later by the resolver
//! - Template detection is a predicate supplied by the view renderer, so the
//!   classifier knows nothing about template engines
//! - Deterministic: same input always yields the same classification

pub mod classifier;
pub mod path;

pub use classifier::{Classification, RequestClassifier};
