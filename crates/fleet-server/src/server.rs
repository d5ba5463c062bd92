use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ApiResult;
use crate::registry::Registry;
use crate::router::build_router;

/// Fleet registry server.
pub struct ApiServer {
    config: ServerConfig,
    registry: Registry,
}

impl ApiServer {
    pub fn new(config: ServerConfig) -> Self {
        let registry = Registry::new(config.channel_capacity);
        Self { config, registry }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The live registry (useful for tests observing the feed).
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.registry.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ApiResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("fleet server listening on {}", self.config.bind_addr);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
