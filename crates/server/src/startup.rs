use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, ServerConfig};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::account::{Argon2Hasher, CredentialHasher};
use service::ServiceContext;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils; JSON output when configured.
pub fn init_logging(cfg: &ServerConfig) {
    if cfg.json_logs {
        init_logging_json();
    } else {
        init_logging_default();
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}:{}: {e}", cfg.host, cfg.port)))
}

/// Wire services onto an open connection and build the router.
pub fn build_app(db: DatabaseConnection, cfg: &AppConfig) -> Result<Router, StartupError> {
    let hasher: Arc<dyn CredentialHasher> = Arc::new(
        Argon2Hasher::from_config(&cfg.password).map_err(|e| StartupError::InvalidConfig(e.to_string()))?,
    );
    let state = ServerState::new(ServiceContext::new(db, hasher));
    Ok(routes::build_router(state, build_cors()))
}

/// Resolve on Ctrl+C; if the signal handler cannot be installed, never resolve.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c handler unavailable; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}

/// Public entry: connect, migrate if configured and serve until Ctrl+C.
///
/// `cfg` must already be validated; logging is the caller's job.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        models::db::migrate(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;
        info!("migrations applied");
    }

    let app = build_app(db, &cfg)?;
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let cfg = ServerConfig { host: "not a host".into(), ..Default::default() };
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
        let ok = bind_addr(&ServerConfig::default()).unwrap();
        assert_eq!(ok.port(), 8080);
    }
}
