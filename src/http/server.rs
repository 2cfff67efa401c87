//! HTTP server setup.
//!
//! # Responsibilities
//! - Mount the mux as the fallback service of an Axum router
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind to a listener and serve until shutdown

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::UuidRequestId;
use crate::http::service::MuxService;

/// HTTP server fronting a [`MuxService`].
pub struct HttpServer {
    router: axum::Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new<T>(config: ServerConfig, service: MuxService<T>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let router = Self::build_router(&config, service);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router<T>(config: &ServerConfig, service: MuxService<T>) -> axum::Router
    where
        T: Clone + Send + Sync + 'static,
    {
        // Last layer added runs first.
        axum::Router::new()
            .fallback_service(service)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for in-process testing.
    pub fn into_router(self) -> axum::Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
