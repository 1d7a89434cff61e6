// HTTPサーバー本体

use super::routes::configure_routes;
use super::state::AppState;
use crate::services::ServerConfig;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;

/// HTTPサーバーを起動し、停止するまで待つ
pub async fn run_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let bind_addr = config.bind_address();
    info!(host = %bind_addr.0, port = bind_addr.1, "Starting HTTP server");

    let state = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(bind_addr.clone())
    .with_context(|| format!("Failed to bind {}:{}", bind_addr.0, bind_addr.1))?
    .run();

    server.await.context("HTTP server terminated with an error")?;

    info!("HTTP server stopped");
    Ok(())
}
