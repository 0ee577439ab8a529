//! Server pages host.
//!
//! ```text
//!     Client Request
//!     ──▶ http server (request ID, trace, timeout)
//!         ──▶ dispatch engine ──▶ application by mount
//!             ──▶ asset locations | view renderer
//!             ──▶ SPA index / error page on failure
//!     ◀── Response
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use server_pages::config::{load_config, ObservabilityConfig};
use server_pages::http::HttpServer;
use server_pages::lifecycle::{self, Shutdown};
use server_pages::observability::{logging, report};

#[derive(Debug, Parser)]
#[command(name = "server-pages", version, about = "Serve static assets, templates and SPAs per application")]
struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, default_value = "server-pages.toml")]
    config: PathBuf,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            let _ = logging::init(&ObservabilityConfig::default());
            tracing::error!(config = %cli.config.display(), error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "server-pages starting"
    );

    let apps = lifecycle::start(&config).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to start server pages applications");
    })?;
    if config.observability.startup_report {
        report::log_startup_report(&apps);
    }
    let engine = lifecycle::build_engine(&config, apps);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    let server = HttpServer::new(config, engine);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
