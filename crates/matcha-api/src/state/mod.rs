//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the database pool for readiness checks, the realtime hub and the
//! configuration.

use std::sync::Arc;

use matcha_common::AppConfig;
use matcha_db::PgPool;
use matcha_realtime::RealtimeHub;
use matcha_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    pool: PgPool,
    hub: Arc<RealtimeHub>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        service_context: Arc<ServiceContext>,
        pool: PgPool,
        hub: Arc<RealtimeHub>,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context,
            pool,
            hub,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Shared handle to the service context, for the realtime router
    pub fn shared_context(&self) -> Arc<ServiceContext> {
        Arc::clone(&self.service_context)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn hub(&self) -> &Arc<RealtimeHub> {
        &self.hub
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("hub", &"RealtimeHub")
            .field("config", &"AppConfig")
            .finish()
    }
}
