//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (extensions reference declared apps)
//! - Validate value ranges (timeouts > 0, error statuses, mount paths, patterns)
//! - Check required template extensions against the view settings
//! - Detect clashing applications
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerPagesConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

use crate::app::builder::normalize_extension;
use crate::config::schema::{AppConfig, ServerPagesConfig};
use crate::routing::path::normalize_mount;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("application name must not be empty")]
    EmptyName,
    #[error("application '{0}' declared more than once")]
    DuplicateName(String),
    #[error("application '{app}': mount path '{mount}' must start with '/'")]
    RelativeMount { app: String, mount: String },
    #[error("application '{app}': mount path {mount} already used by '{other}'")]
    MountClash { app: String, mount: String, other: String },
    #[error("application '{app}': invalid {what} pattern: {reason}")]
    InvalidPattern { app: String, what: &'static str, reason: String },
    #[error("application '{app}': error page status {status} is not an error status (400-599)")]
    InvalidStatus { app: String, status: u16 },
    #[error("application '{app}': more than one default error page")]
    MultipleDefaultErrorPages { app: String },
    #[error("extension targets unknown application '{0}'")]
    UnknownExtensionTarget(String),
    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,
    #[error("application '{app}': required template extension '{extension}' is not in views.template_extensions")]
    UnsupportedTemplateExtension { app: String, extension: String },
}

/// Validate the whole configuration.
pub fn validate_config(config: &ServerPagesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let template_extensions: HashSet<String> = config
        .views
        .template_extensions
        .iter()
        .map(|e| normalize_extension(e))
        .collect();
    let mut names = HashSet::new();
    let mut mounts: Vec<(String, &str)> = Vec::new();

    for app in &config.apps {
        if app.name.is_empty() {
            errors.push(ValidationError::EmptyName);
        } else if !names.insert(app.name.as_str()) {
            errors.push(ValidationError::DuplicateName(app.name.clone()));
        }

        if !app.mount_path.starts_with('/') {
            errors.push(ValidationError::RelativeMount {
                app: app.name.clone(),
                mount: app.mount_path.clone(),
            });
        }
        let mount = normalize_mount(&app.mount_path);
        if let Some((_, other)) = mounts.iter().find(|(m, _)| *m == mount) {
            errors.push(ValidationError::MountClash {
                app: app.name.clone(),
                mount: mount.clone(),
                other: other.to_string(),
            });
        }
        mounts.push((mount, app.name.as_str()));

        validate_app(app, &mut errors);
        for extension in &app.required_extensions {
            if !template_extensions.contains(&normalize_extension(extension)) {
                errors.push(ValidationError::UnsupportedTemplateExtension {
                    app: app.name.clone(),
                    extension: extension.clone(),
                });
            }
        }
    }

    for extension in &config.extensions {
        if !names.contains(extension.app.as_str()) {
            errors.push(ValidationError::UnknownExtensionTarget(extension.app.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_app(app: &AppConfig, errors: &mut Vec<ValidationError>) {
    for (what, pattern) in [("file request", &app.file_pattern), ("SPA exclusion", &app.spa_exclude)] {
        if let Err(e) = Regex::new(pattern) {
            errors.push(ValidationError::InvalidPattern {
                app: app.name.clone(),
                what,
                reason: e.to_string(),
            });
        }
    }

    let mut defaults = 0;
    for page in &app.error_pages {
        match page.status {
            Some(status) if !(400..=599).contains(&status) => {
                errors.push(ValidationError::InvalidStatus {
                    app: app.name.clone(),
                    status,
                });
            }
            Some(_) => {}
            None => defaults += 1,
        }
    }
    if defaults > 1 {
        errors.push(ValidationError::MultipleDefaultErrorPages {
            app: app.name.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ErrorPageConfig, ExtensionConfig};

    fn app(name: &str, mount: &str) -> AppConfig {
        toml::from_str(&format!(
            "name = \"{name}\"\nmount_path = \"{mount}\"\nassets_location = \"web\""
        ))
        .unwrap()
    }

    #[test]
    fn test_valid_config() {
        let mut config = ServerPagesConfig::default();
        config.apps.push(app("one", "/one"));
        config.apps.push(app("two", "/two"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duplicates_detected() {
        let mut config = ServerPagesConfig::default();
        config.apps.push(app("one", "/one"));
        config.apps.push(app("one", "/one/"));
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateName("one".into())));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::MountClash { .. })));
    }

    #[test]
    fn test_app_settings_checked() {
        let mut bad = app("bad", "bad");
        bad.file_pattern = "(".into();
        bad.error_pages = vec![
            ErrorPageConfig { status: Some(302), page: "x".into() },
            ErrorPageConfig { status: None, page: "a".into() },
            ErrorPageConfig { status: None, page: "b".into() },
        ];
        let mut config = ServerPagesConfig::default();
        config.apps.push(bad);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4, "{errors:?}");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ServerPagesConfig::default();
        config.timeouts.request_secs = 0;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::ZeroRequestTimeout]
        );
    }

    #[test]
    fn test_required_extension_must_be_configured() {
        let mut shop = app("shop", "/shop");
        shop.required_extensions = vec!["FTL".into(), "jsp".into()];
        let mut config = ServerPagesConfig::default();
        config.apps.push(shop);
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::UnsupportedTemplateExtension {
                app: "shop".into(),
                extension: "jsp".into(),
            }]
        );
    }

    #[test]
    fn test_extension_target_must_exist() {
        let mut config = ServerPagesConfig::default();
        config.apps.push(app("one", "/one"));
        config.extensions.push(ExtensionConfig {
            app: "two".into(),
            assets: vec![],
            views: vec![],
        });
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::UnknownExtensionTarget("two".into())]
        );
    }
}
