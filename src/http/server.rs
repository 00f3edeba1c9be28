//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, timeouts, limits, panics)
//! - Serve the public edge and, when enabled, the admin API
//! - Apply validated configuration reloads without dropping cart state
//! - Shut down gracefully on the lifecycle signal

use arc_swap::ArcSwap;
use axum::{extract::DefaultBodyLimit, middleware, Router};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::setup_admin_router;
use crate::cart::CartStore;
use crate::config::EdgeConfig;
use crate::http::middleware::track_requests;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::panic_response;
use crate::proxy::{BackendClient, ProxyError};
use crate::routing::build_router;
use crate::security::headers;

/// Settings that may change on reload, swapped as one unit.
#[derive(Debug)]
pub struct EdgeRuntime {
    pub config: EdgeConfig,
    pub backend: BackendClient,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<EdgeRuntime>>,
    pub carts: CartStore,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: EdgeConfig) -> Result<Self, ProxyError> {
        let backend = BackendClient::new(&config.backend)?;
        Ok(Self {
            inner: Arc::new(ArcSwap::from_pointee(EdgeRuntime { config, backend })),
            carts: CartStore::new(),
            started_at: Instant::now(),
        })
    }

    /// Current configuration generation.
    pub fn runtime(&self) -> Arc<EdgeRuntime> {
        self.inner.load_full()
    }

    /// Swap in a new backend client and settings. Cart state is kept.
    pub fn reload(&self, config: EdgeConfig) -> Result<(), ProxyError> {
        let backend = BackendClient::new(&config.backend)?;
        let current = self.inner.load();
        if current.config.listener != config.listener || current.config.security != config.security
        {
            tracing::warn!("Listener and security settings only apply after a restart");
        }
        tracing::info!(backend_url = %config.backend.base_url, "Configuration reloaded");
        self.inner.store(Arc::new(EdgeRuntime { config, backend }));
        Ok(())
    }
}

/// HTTP server for the storefront edge.
pub struct HttpServer {
    router: Router,
    config: EdgeConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, ProxyError> {
        let state = AppState::new(config.clone())?;
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        let router = build_router(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(middleware::from_fn(track_requests));

        headers::apply(router, &config.security)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
            .layer(CatchPanicLayer::custom(panic_response))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configuration updates arrive on `config_updates`; the server stops when
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<EdgeConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend_url = %self.config.backend.base_url,
            "HTTP server starting"
        );

        let reload_state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                if let Err(e) = reload_state.reload(config) {
                    tracing::error!(error = %e, "Rejected configuration reload");
                }
            }
        });

        let admin = if self.config.admin.enabled {
            let admin_listener = TcpListener::bind(&self.config.admin.bind_address).await?;
            tracing::info!(address = %admin_listener.local_addr()?, "Admin API listening");
            let app = setup_admin_router(self.state.clone());
            let mut admin_shutdown = shutdown.resubscribe();
            Some(tokio::spawn(async move {
                axum::serve(admin_listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = admin_shutdown.recv().await;
                    })
                    .await
            }))
        } else {
            None
        };

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        if let Some(admin) = admin {
            match admin.await {
                Ok(result) => result?,
                Err(e) => tracing::error!(error = %e, "Admin server task failed"),
            }
        }

        tracing::info!(
            active_sessions = self.state.carts.active_sessions(),
            "HTTP server stopped; in-memory carts discarded"
        );
        Ok(())
    }

    /// Shared state (cart store, runtime settings).
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
