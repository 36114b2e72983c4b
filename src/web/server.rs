//! Web server implementation
//!
//! Provides the main server struct and configuration.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;

use super::routes::{api_routes, AppState};
use super::{DEFAULT_BIND, DEFAULT_PORT, DEFAULT_UPLOAD_LIMIT};
use crate::config::ConvertConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Address to bind to
    pub bind: String,
    /// Maximum upload size in bytes
    pub upload_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Create a new server config with the given port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Create a new server config with the given bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Create a new server config with the given upload limit
    pub fn with_upload_limit(mut self, limit: usize) -> Self {
        self.upload_limit = limit;
        self
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }
}

/// Assemble the application router around the given state.
///
/// Exposed separately so tests can drive the same router with a fake
/// converter in the state.
pub fn router_with_state(state: Arc<AppState>, upload_limit: usize) -> Router {
    api_routes()
        .layer(RequestBodyLimitLayer::new(upload_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Web server instance
pub struct WebServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a server with default configuration
    pub fn new(convert: ConvertConfig) -> Self {
        Self::with_config(ServerConfig::default(), convert)
    }

    /// Create a server with the given configuration
    pub fn with_config(config: ServerConfig, convert: ConvertConfig) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(convert)),
        }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router
    fn build_router(&self) -> Router {
        router_with_state(self.state.clone(), self.config.upload_limit)
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.socket_addr()?;
        let router = self.build_router();

        info!(%addr, "starting server");
        info!("  POST /convert - upload a PDF, receive the DOCX");
        info!("  GET  /health  - health check");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(super::shutdown::wait_for_shutdown_signal())
            .await?;

        Ok(())
    }
}
