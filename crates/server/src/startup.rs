use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use configs::{AppConfig, CorsConfig};
use migration::MigratorTrait;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use crate::errors;
use crate::routes::{self, auth::ServerState};

/// Explicit origin allow-list with credentials.
pub fn build_cors(cfg: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origins = cfg
        .allowed_origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin {o:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(event = "shutdown_signal", signal = "ctrl_c", "shutting down"),
        _ = terminate => info!(event = "shutdown_signal", signal = "sigterm", "shutting down"),
    }
}

/// Public entry: connect, migrate, build the app and serve until a shutdown signal.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    errors::expose_internal_detail(cfg.app.is_development());

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await.context("running migrations")?;
        info!(event = "migrations_applied", "schema up to date");
    } else {
        warn!(event = "migrations_skipped", "auto_migrate disabled");
    }

    let state = ServerState::new(db.clone(), &cfg.rate_limit);

    // Forget elapsed login windows so the map does not grow without bound
    let limiter = state.login_limiter.clone();
    let window = Duration::from_secs(cfg.rate_limit.login_window_secs);
    let sweeper = tokio::spawn(async move {
        let mut tick = tokio::time::interval(window);
        loop {
            tick.tick().await;
            limiter.purge_expired();
        }
    });

    let cors = build_cors(&cfg.cors)?;
    let app = routes::build_router(state, cors);

    let bind = cfg.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind).await.with_context(|| format!("binding {bind}"))?;
    let addr = listener.local_addr()?;
    info!(%addr, environment = %cfg.app.environment, "bike shop api listening");

    let served = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sweeper.abort();
    if let Err(e) = db.close().await {
        warn!(error = %e, "closing database pool failed");
    }
    info!(event = "stopped", "server shutdown complete");
    served?;
    Ok(())
}
