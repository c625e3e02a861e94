//! Wiring and lifecycle of the customer and hotel services.

use std::{future::Future, sync::Arc};

use anyhow::Context;
use axum::Router;
use concierge_db::{DocumentStore, MemoryStore};
use concierge_kernel::{InitCtx, ModuleRegistry, ServiceKind, Settings};
use tokio::net::TcpListener;

use crate::modules::{
    self,
    customers::directory::{HotelDirectory, HttpHotelDirectory},
};

/// One bootable service: its kind plus the registry of its modules.
pub struct Service {
    kind: ServiceKind,
    registry: ModuleRegistry,
}

impl Service {
    pub fn hotel(store: Arc<dyn DocumentStore>) -> Self {
        let mut registry = ModuleRegistry::new();
        modules::register_hotel_service(&mut registry, store);
        Self {
            kind: ServiceKind::Hotel,
            registry,
        }
    }

    pub fn customer(store: Arc<dyn DocumentStore>, hotels: Arc<dyn HotelDirectory>) -> Self {
        let mut registry = ModuleRegistry::new();
        modules::register_customer_service(&mut registry, store, hotels);
        Self {
            kind: ServiceKind::Customer,
            registry,
        }
    }

    /// Wire a service from configuration, each with its own store.
    pub fn from_settings(kind: ServiceKind, settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        match kind {
            ServiceKind::Hotel => Ok(Self::hotel(store)),
            ServiceKind::Customer => {
                let hotels = HttpHotelDirectory::new(&settings.hotel_directory)
                    .context("failed to configure hotel directory")?;
                Ok(Self::customer(store, Arc::new(hotels)))
            }
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn router(&self, settings: &Settings) -> Router {
        concierge_http::build_router(&self.registry, self.kind, settings.server(self.kind))
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(self, settings: &Settings, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.start_modules(settings).await?;
        let served = concierge_http::start_server(
            &self.registry,
            self.kind,
            settings.server(self.kind),
            shutdown,
        )
        .await;
        self.stop_modules(served).await
    }

    /// Like [`Service::run`] on a listener the caller already bound.
    pub async fn run_on<F>(
        self,
        listener: TcpListener,
        settings: &Settings,
        shutdown: F,
    ) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.start_modules(settings).await?;
        let served =
            concierge_http::serve(listener, self.router(settings), self.kind, shutdown).await;
        self.stop_modules(served).await
    }

    async fn start_modules(&self, settings: &Settings) -> anyhow::Result<()> {
        let ctx = InitCtx {
            settings,
            service: self.kind,
        };
        self.registry.init_all(&ctx).await?;
        self.registry.start_all(&ctx).await
    }

    /// Modules are stopped even when serving failed; the serve error wins.
    async fn stop_modules(&self, served: anyhow::Result<()>) -> anyhow::Result<()> {
        let stopped = self.registry.stop_all().await;
        served.with_context(|| format!("{} service terminated abnormally", self.kind))?;
        stopped
    }
}

/// Resolves on ctrl-c, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
