//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::app::builder::{DEFAULT_FILE_PATTERN, DEFAULT_INDEX, DEFAULT_SPA_EXCLUDE};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerPagesConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Template detection settings for the built-in view renderer.
    pub views: ViewsConfig,

    /// Server pages applications.
    pub apps: Vec<AppConfig>,

    /// Locations contributed to applications by name.
    pub extensions: Vec<ExtensionConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,

    /// Pretty output for development, JSON for production.
    pub log_format: LogFormat,

    /// Log a summary of every application after start.
    pub startup_report: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            startup_report: true,
        }
    }
}

/// Built-in view renderer settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// File extensions treated as templates.
    pub template_extensions: Vec<String>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            template_extensions: vec!["ftl".into(), "hbs".into(), "mustache".into()],
        }
    }
}

/// One server pages application.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Unique application name (also the default rest prefix).
    pub name: String,

    /// URI the application is mounted on (e.g., "/app").
    pub mount_path: String,

    /// Main assets location (directory).
    pub assets_location: String,

    /// Index page served for the mount root.
    #[serde(default = "default_index")]
    pub index_file: String,

    /// Regex detecting file requests; the first group is the file name.
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// Enable SPA route fallback.
    #[serde(default)]
    pub spa: bool,

    /// Regex for paths never treated as SPA routes.
    #[serde(default = "default_spa_exclude")]
    pub spa_exclude: String,

    /// Additional asset locations.
    #[serde(default)]
    pub assets: Vec<AssetLocationConfig>,

    /// View (rest) prefix mappings.
    #[serde(default)]
    pub views: Vec<ViewMappingConfig>,

    /// Custom error pages.
    #[serde(default)]
    pub error_pages: Vec<ErrorPageConfig>,

    /// Template extensions the application cannot work without.
    #[serde(default)]
    pub required_extensions: Vec<String>,
}

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

fn default_file_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}

fn default_spa_exclude() -> String {
    DEFAULT_SPA_EXCLUDE.to_string()
}

/// Asset location under a URL prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetLocationConfig {
    #[serde(default)]
    pub prefix: String,
    pub location: String,
}

/// View mapping: URL prefix → rest prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewMappingConfig {
    #[serde(default)]
    pub prefix: String,
    pub target: String,
}

/// Error page; without `status` it is the default page for all errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorPageConfig {
    #[serde(default)]
    pub status: Option<u16>,
    pub page: String,
}

/// Locations added to an application declared elsewhere.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtensionConfig {
    /// Target application name.
    pub app: String,

    #[serde(default)]
    pub assets: Vec<AssetLocationConfig>,

    #[serde(default)]
    pub views: Vec<ViewMappingConfig>,
}
