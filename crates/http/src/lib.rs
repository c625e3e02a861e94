//! HTTP server facade for Concierge services with Axum, error handling, and OpenAPI support.

use std::future::Future;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use concierge_kernel::{settings::ServerSettings, ModuleRegistry, ServiceKind};

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Bind the configured address and serve until `shutdown` resolves
pub async fn start_server<F>(
    registry: &ModuleRegistry,
    kind: ServiceKind,
    server: &ServerSettings,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!(service = %kind, "starting HTTP server on {}", server.bind_addr());

    let app = build_router(registry, kind, server);

    let listener = TcpListener::bind(server.bind_addr())
        .await
        .with_context(|| format!("failed to bind to address {}", server.bind_addr()))?;

    serve(listener, app, kind, shutdown).await
}

/// Serve an already-built router on an already-bound listener
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    kind: ServiceKind,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener
        .local_addr()
        .context("failed to read listener address")?;
    tracing::info!(service = %kind, "HTTP server listening on http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!(service = %kind, "HTTP server stopped");
    Ok(())
}

/// Build the service router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, kind: ServiceKind, server: &ServerSettings) -> Router {
    let mut router_builder = RouterBuilder::new()
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(server.request_timeout_ms)
        .route("/healthz", router::health_route());

    for module in registry.modules() {
        tracing::info!(service = %kind, module = module.name(), "mounting module routes");
        router_builder = router_builder.mount_module(module.routes());
    }

    router_builder
        .with_openapi(registry, kind.api_title())
        .build()
}
