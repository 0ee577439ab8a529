//! Location overlay subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup, single-threaded):
//!     (prefix, location) pairs + extension registries
//!     → registry.rs (LocationRegistry, mutable, merge-able)
//!     → freeze()
//!     → table.rs (ResolvedPrefixTable, immutable)
//!
//! Lookup (per request):
//!     logical path
//!     → resolver.rs (walk table: longest prefix first, newest location first)
//!     → first existing backing location or NotFound
//! ```
//!
//! # Design Decisions
//! - The builder and the frozen table are distinct types; `freeze` consumes
//!   the builder so a frozen table can never be mutated
//! - Existence checks go through the `ResourceProbe` capability so lookup
//!   order can be tested without touching the filesystem
//! - Used for both asset roots and view (rest) prefix mappings

pub mod registry;
pub mod resolver;
pub mod table;

pub use registry::LocationRegistry;
pub use resolver::{FsProbe, LookupError, ResourceProbe, ResourceResolver};
pub use table::{PrefixEntry, ResolvedPrefixTable};
