use std::sync::Arc;

use ripe_mcp_gateway::{build_app, config::Config, logging, ripe_client::RipeClient, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let directory = Arc::new(RipeClient::from_config(&config)?);
    let bind_socket = config.bind_socket()?;
    let app = build_app(AppState::new(directory));
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        upstream_url = %config.upstream_url,
        timeout_seconds = config.request_timeout_seconds,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
