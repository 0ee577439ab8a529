//! Application registration subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (single-threaded):
//!     AppBuilder (mutable: locations, views, error pages, SPA)
//!     + extensions registered by name (possibly before the app itself)
//!     → registry.rs start()
//!     → merge extensions, freeze location tables, compile patterns
//!     → Application (immutable, shared via Arc)
//!
//! Runtime:
//!     AppSet (mount path lookup, longest mount first) → Application
//! ```
//!
//! # Design Decisions
//! - Builder and runtime application are different types; a started
//!   application cannot be mutated at all
//! - Late extensions fail with `AlreadyStarted` instead of being lost
//! - All configuration errors surface at startup, never at request time

pub mod application;
pub mod builder;
pub mod error;
pub mod registry;

pub use application::{AppSet, Application};
pub use builder::AppBuilder;
pub use error::RegistryError;
pub use registry::{AppRegistry, Extension};
