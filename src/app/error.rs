//! Startup error taxonomy.

use thiserror::Error;

/// Fatal registration errors. Every one of them aborts startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Can't extend '{app}' application resources because application already started")]
    AlreadyStarted { app: String },

    #[error("Duplicate registration for server pages application '{app}': {detail}")]
    DuplicateRegistration { app: String, detail: String },

    #[error("Application '{app}' requires '{extension}' templates, but no view renderer handles them")]
    MissingTemplateSupport { app: String, extension: String },

    #[error("Application '{app}' is not registered")]
    UnknownApp { app: String },

    #[error("Invalid {what} pattern '{pattern}' for application '{app}': {source}")]
    InvalidPattern {
        app: String,
        what: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
