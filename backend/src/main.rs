//! Coupon service entry-point: loads settings, connects the store and serves
//! the HTTP API until a shutdown signal arrives.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::CouponSettings;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CouponSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = connect_store(&settings, ServerConfig::from_settings(&settings)).await;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(
        host = settings.host(),
        port = settings.port(),
        reset_enabled = settings.reset_enabled(),
        "coupon service listening"
    );

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await?;
    info!("coupon service stopped");
    Ok(())
}

/// Attach the store to `config`, or record why it is unavailable.
///
/// A missing URL, failed migration or unreachable database never aborts
/// startup; coupon endpoints answer 500 until the service is restarted with a
/// working store.
async fn connect_store(settings: &CouponSettings, config: ServerConfig) -> ServerConfig {
    let Some(pool_config) = settings.pool_config() else {
        error!("COUPONS_DATABASE_URL is not set; coupon store unavailable");
        return config;
    };

    if settings.run_migrations() {
        if let Err(err) = run_pending_migrations(pool_config.database_url()).await {
            error!(error = %err, "database migrations failed; coupon store unavailable");
            return config.with_store_unavailable(err.to_string());
        }
    }

    match DbPool::new(pool_config).await {
        Ok(pool) => {
            info!("coupon store connected");
            config.with_db_pool(pool)
        }
        Err(err) => {
            error!(error = %err, "coupon store connection failed");
            config.with_store_unavailable(err.to_string())
        }
    }
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(err) => {
                error!(error = %err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings_with(database_url: Option<&str>, reset_enabled: Option<bool>) -> CouponSettings {
        CouponSettings {
            host: None,
            port: None,
            database_url: database_url.map(str::to_owned),
            reset_enabled,
            run_migrations: None,
            pool_max_size: None,
            pool_timeout_secs: Some(1),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn missing_database_url_leaves_the_store_unavailable() {
        let settings = settings_with(None, Some(true));

        let config = connect_store(&settings, ServerConfig::from_settings(&settings)).await;

        assert!(config.db_pool.is_none());
        assert!(config.reset_enabled);
        assert_eq!(
            config.store_unavailable_reason,
            "COUPONS_DATABASE_URL is not set"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_database_fails_migrations_without_aborting() {
        let settings = settings_with(Some("postgres://127.0.0.1:1/coupons"), None);

        let config = connect_store(&settings, ServerConfig::from_settings(&settings)).await;

        assert!(config.db_pool.is_none());
        assert!(!config.reset_enabled);
        assert!(
            config
                .store_unavailable_reason
                .starts_with("failed to connect for migrations"),
            "reason: {}",
            config.store_unavailable_reason
        );
    }
}
