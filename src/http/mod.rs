//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → dispatch.rs (DispatchEngine)
//!         → AppSet lookup by mount
//!         → SPA marking → classification
//!         → asset.rs (AssetServer) | view.rs (ViewRenderer)
//!         → error status? → fallback::ErrorPageResolver → forward
//!     → response.rs (raw errors, no-cache)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Byte serving and template rendering sit behind traits; the engine only
//!   decides who handles a request and from which location
//! - Error statuses from collaborators are captured, never sent directly,
//!   until the error page resolver has had its say
//! - Each forward happens at most once per request

pub mod asset;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod server;
pub mod view;

pub use asset::{AssetServer, FileAssetServer};
pub use dispatch::{DispatchEngine, DispatchError};
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
pub use view::{FileViewRenderer, ViewError, ViewRenderer, ViewRequest};
