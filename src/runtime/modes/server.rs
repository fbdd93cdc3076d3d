//! Server mode
//!
//! Builds the HTTP server from the startup context, binds it and waits for
//! either the server to exit or a shutdown signal.

use std::time::Duration;

use actix_web::{
    App, HttpServer,
    middleware::{DefaultHeaders, from_fn},
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::{self, middleware::RequestIdMiddleware};
use crate::config::AppConfig;
use crate::runtime::lifetime::{self, shutdown::SHUTDOWN_TIMEOUT_SECS};

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &AppConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config).map_err(|e| {
        tracing::error!("Server startup failed: {:#}", e);
        e
    })?;
    let state = startup.state;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} worker(s) for the server", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(RequestIdMiddleware::tag)) // 为每个请求生成 request_id
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .configure(api::routes(state.clone()))
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive_secs))
    .client_request_timeout(Duration::from_millis(config.server.client_request_timeout_ms))
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .disable_signals()
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();
    warn!(
        "Serving {} records at http://{}",
        startup.record_count, bind_address
    );

    let handle = server.handle();
    let mut server = std::pin::pin!(server);

    // Wait for server or shutdown signal
    tokio::select! {
        res = &mut server => {
            res.context("HTTP server terminated unexpectedly")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            handle.stop(true).await;
            server.await.context("HTTP server failed during shutdown")?;
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
