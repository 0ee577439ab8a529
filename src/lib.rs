//! Server pages: one namespace per registered application that merges static
//! assets, directly invoked templates and client-side (SPA) routes.

pub mod app;
pub mod config;
pub mod fallback;
pub mod http;
pub mod lifecycle;
pub mod locations;
pub mod observability;
pub mod routing;

pub use app::{AppBuilder, AppRegistry, AppSet, Application};
pub use config::ServerPagesConfig;
pub use http::{DispatchEngine, HttpServer};
pub use lifecycle::Shutdown;
