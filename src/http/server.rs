//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the dispatch handler as catch-all
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerPagesConfig;
use crate::http::dispatch::DispatchEngine;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::lifecycle::shutdown::signalled;

/// HTTP server in front of the dispatch engine.
pub struct HttpServer {
    router: Router,
    config: ServerPagesConfig,
}

impl HttpServer {
    pub fn new(config: ServerPagesConfig, engine: DispatchEngine) -> Self {
        let router = Self::build_router(&config, Arc::new(engine));
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerPagesConfig, engine: Arc<DispatchEngine>) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(engine)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router (used by tests to drive requests in-process).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown event fires (see `Shutdown`).
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signalled(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerPagesConfig {
        &self.config
    }
}

async fn dispatch_handler(
    State(engine): State<Arc<DispatchEngine>>,
    request: Request<Body>,
) -> Response {
    match engine.dispatch(request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}
