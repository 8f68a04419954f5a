//! Server setup and initialization
//!
//! Wires the repositories, the realtime hub and the services together and
//! serves REST and WebSocket routes from one listener, so that fan-out
//! triggered by a REST call reaches sockets held by this process.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use matcha_common::{AppConfig, AppError, JwtService};
use matcha_db::{
    create_pool, run_migrations, PgBlockRepository, PgChatRepository, PgMatchRepository,
    PgMessageRepository, PgNotificationRepository, PgPool, PgProfileRepository, PoolConfig,
    PgReportRepository, PgSwipeRepository, PgTagRepository, PgTokenRepository, PgUserRepository,
    PgViewRepository,
};
use matcha_realtime::{ConnectionSettings, RealtimeHub, RealtimeState};
use matcha_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete application: REST routes with middleware, health
/// checks, and the realtime socket routes sharing the same hub
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    let realtime = matcha_realtime::create_router(RealtimeState::new(
        Arc::clone(state.hub()),
        state.shared_context(),
    ));

    Ok(api.merge(health_routes()).with_state(state).merge(realtime))
}

/// Build the service context on top of a pool and a publisher
pub fn build_service_context(
    pool: &PgPool,
    hub: Arc<RealtimeHub>,
    config: &AppConfig,
) -> Result<ServiceContext, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .token_repo(Arc::new(PgTokenRepository::new(pool.clone())))
        .profile_repo(Arc::new(PgProfileRepository::new(pool.clone())))
        .swipe_repo(Arc::new(PgSwipeRepository::new(pool.clone())))
        .match_repo(Arc::new(PgMatchRepository::new(pool.clone())))
        .chat_repo(Arc::new(PgChatRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .view_repo(Arc::new(PgViewRepository::new(pool.clone())))
        .block_repo(Arc::new(PgBlockRepository::new(pool.clone())))
        .report_repo(Arc::new(PgReportRepository::new(pool.clone())))
        .tag_repo(Arc::new(PgTagRepository::new(pool.clone())))
        .publisher(hub)
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let hub = Arc::new(RealtimeHub::new(ConnectionSettings::from(&config.realtime)));
    let service_context = build_service_context(&pool, Arc::clone(&hub), &config)?;

    Ok(AppState::new(
        Arc::new(service_context),
        pool,
        hub,
        config,
    ))
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
