//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerPagesConfig (validated, immutable)
//!     → lifecycle::startup builds and starts the applications
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; applications are frozen from it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AppConfig, AssetLocationConfig, ErrorPageConfig, ExtensionConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, ServerPagesConfig, TimeoutConfig, ViewMappingConfig, ViewsConfig,
};
pub use validation::{validate_config, ValidationError};
