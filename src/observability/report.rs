//! Startup report: what each application serves and from where.

use crate::app::{AppSet, Application};

/// Log one summary line per started application.
pub fn log_startup_report(apps: &AppSet) {
    if apps.is_empty() {
        tracing::warn!("No server pages applications configured");
        return;
    }
    for app in apps.iter() {
        log_application(app);
    }
}

fn log_application(app: &Application) {
    let assets: Vec<String> = app
        .assets()
        .entries()
        .iter()
        .map(|e| format!("/{} -> {:?}", e.prefix, e.locations))
        .collect();
    let views: Vec<String> = app
        .views()
        .entries()
        .iter()
        .map(|e| format!("/{} -> {:?}", e.prefix, e.locations))
        .collect();
    let error_pages: Vec<String> = app
        .error_pages()
        .pages()
        .iter()
        .map(|(status, page)| format!("{status} -> {page}"))
        .chain(app.error_pages().default_page().map(|page| format!("* -> {page}")))
        .collect();

    tracing::info!(
        app = %app.name(),
        mount = %app.mount(),
        index = %app.index(),
        file_pattern = %app.file_pattern().as_str(),
        spa = app.spa().is_enabled(),
        spa_exclude = %app.spa().exclusion(),
        assets = ?assets,
        views = ?views,
        error_pages = ?error_pages,
        "Server pages application ready"
    );
}
