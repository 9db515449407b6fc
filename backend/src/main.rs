//! Backend entry point: loads settings, connects PostgreSQL and the read
//! cache, and serves the REST API until SIGINT or SIGTERM.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{
    AppSettings, ServerConfig, ServiceSettings, StorePorts, build_cache, build_http_state,
    create_server, ephemeral_secret_allowed,
};
use todo_backend::inbound::http::health::HealthState;
use todo_backend::outbound::persistence::{DbPool, PoolConfig, ensure_schema};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| eyre!("failed to load settings: {e}"))?;
    let bind_addr = settings.bind_addr()?;
    let jwt_secret = settings.resolve_jwt_secret(ephemeral_secret_allowed())?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()?).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to create database pool")?;
    ensure_schema(&pool)
        .await
        .wrap_err("failed to prepare database schema")?;
    let cache = build_cache(settings.redis_url())
        .await
        .wrap_err("failed to connect to the read cache")?;

    let http_state = build_http_state(
        StorePorts::from_pool(&pool, cache),
        ServiceSettings {
            cache_ttl: settings.cache_ttl(),
            jwt_secret: jwt_secret.as_bytes(),
            clock: Arc::new(DefaultClock),
        },
    )
    .wrap_err("failed to configure token signing")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, http_state))?;
    let handle = server.handle();
    info!(%bind_addr, "listening");

    let mut server_task = actix_web::rt::spawn(server);
    tokio::select! {
        joined = &mut server_task => {
            return joined
                .wrap_err("server task aborted")?
                .wrap_err("server stopped unexpectedly");
        }
        () = shutdown_signal() => {}
    }

    info!("shutdown signal received; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
    server_task
        .await
        .wrap_err("server task aborted")?
        .wrap_err("server failed while draining")?;
    drop(pool);
    info!("shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}
