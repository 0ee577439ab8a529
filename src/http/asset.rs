//! Asset-serving collaborator.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Streams a resolved backing location to the client.
///
/// Error statuses returned here are observed by the dispatch engine and may
/// be replaced by an error page.
#[async_trait]
pub trait AssetServer: Send + Sync {
    async fn serve(&self, location: &str, request: Request<Body>) -> Response;
}

/// Serves files from the local filesystem. Content type, ranges and
/// conditional requests are handled by `ServeFile`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAssetServer;

#[async_trait]
impl AssetServer for FileAssetServer {
    async fn serve(&self, location: &str, request: Request<Body>) -> Response {
        match ServeFile::new(location).oneshot(request).await {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        }
    }
}
