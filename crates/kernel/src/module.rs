use async_trait::async_trait;
use axum::Router;

use crate::settings::{ServiceKind, Settings};

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
    pub service: ServiceKind,
}

/// A unit of functionality mounted into one of the services.
///
/// Modules own their collaborators (store handles, remote clients) and are
/// constructed before the registry drives them through `init`, `start` and
/// `stop`.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Called during service startup before the listener is bound
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes.
    /// Paths are absolute; the router is merged into the service root.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return OpenAPI specification fragment for this module as JSON
    /// Will be merged with other modules' specs
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Called once the module is initialized, right before serving
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during shutdown after the listener stopped accepting requests
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
