//! HTTP server for the fleet registry.
//!
//! Exposes the record store over a REST API with optimistic concurrency
//! control and pushes every committed mutation to WebSocket observers
//! through the change feed. Domain errors are translated to status codes
//! exactly once, at this boundary.

pub mod config;
pub mod error;
pub mod handler;
pub mod registry;
pub mod router;
pub mod server;
pub mod ws;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorBody};
pub use registry::Registry;
pub use router::build_router;
pub use server::ApiServer;
