use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use ea_api::telemetry::init_tracing;
use ea_api::{create_app, AppState};
use ea_core::repositories::{
    ConfirmedEmailRepository, InMemoryConfirmedEmailRepository,
    InMemoryPendingVerificationRepository, PendingVerificationRepository,
};
use ea_core::services::{
    Clock, MailerTrait, SystemClock, VerificationCleanupConfig, VerificationCleanupService,
    VerificationService, VerificationServiceConfig,
};
use ea_infra::cache::{RedisClient, RedisConfirmedEmailRepository, RedisPendingVerificationRepository};
use ea_infra::database::{
    DatabasePool, MySqlConfirmedEmailRepository, MySqlPendingVerificationRepository,
};
use ea_infra::mailer::LogMailer;
use ea_shared::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        environment = ?config.environment,
        storage = ?config.verification.storage,
        "Starting EarlyAccess API"
    );

    match config.verification.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; pending tokens are lost on restart");
            run_server(
                config,
                Arc::new(InMemoryPendingVerificationRepository::new()),
                Arc::new(InMemoryConfirmedEmailRepository::new()),
            )
            .await
        }
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("failed to connect to MySQL")?;
            if !pool.health_check().await.context("MySQL health check failed")? {
                anyhow::bail!("MySQL health check returned an unexpected result");
            }
            pool.run_migrations()
                .await
                .context("failed to run database migrations")?;
            tracing::info!(stats = %pool.get_statistics(), "Database ready");

            let pending = MySqlPendingVerificationRepository::new(pool.get_pool().clone());
            let confirmed = MySqlConfirmedEmailRepository::new(pool.get_pool().clone());
            let result = run_server(config, Arc::new(pending), Arc::new(confirmed)).await;

            pool.close().await;
            result
        }
        StorageBackend::Redis => {
            let client = RedisClient::new(config.cache.clone())
                .await
                .context("failed to connect to Redis")?;
            if !client.health_check().await.context("Redis health check failed")? {
                anyhow::bail!("Redis health check returned an unexpected response");
            }

            run_server(
                config,
                Arc::new(RedisPendingVerificationRepository::new(client.clone())),
                Arc::new(RedisConfirmedEmailRepository::new(client)),
            )
            .await
        }
    }
}

async fn run_server<P, C>(config: AppConfig, pending: Arc<P>, confirmed: Arc<C>) -> anyhow::Result<()>
where
    P: PendingVerificationRepository + 'static,
    C: ConfirmedEmailRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let verification_service = Arc::new(VerificationService::with_clock(
        pending.clone(),
        confirmed,
        clock.clone(),
        VerificationServiceConfig::from(&config.verification),
    ));

    let cleanup = Arc::new(VerificationCleanupService::new(
        pending,
        clock,
        VerificationCleanupConfig::from(&config.verification),
    ));
    let cleanup_handle = cleanup.start_background_task();

    let mailer: Arc<dyn MailerTrait> = Arc::new(LogMailer::with_options(
        config.environment.is_development(),
        false,
    ));

    let app_state = web::Data::new(AppState::new(
        verification_service,
        mailer,
        config.verification.clone(),
    ));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "HTTP server listening");

    let server_config = config.server.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &server_config, environment)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error");

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    tracing::info!("Server stopped");
    result
}
