mod actor_framework;
mod app_system;
mod auth;
mod booking_actor;
mod clients;
mod config;
mod dispatch;
mod domain;
mod driver_actor;
mod error;
mod http;
mod messages;
mod notify;
mod pricing;
mod truck_actor;
mod user_actor;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info};

use crate::app_system::{setup_tracing, LogisticsSystem};
use crate::auth::TokenKeys;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::from_env()?;
    info!(port = config.port, "Starting truck booking service");

    let system = LogisticsSystem::from_config(&config);
    if let Some(seed) = &config.admin {
        system.seed_admin(seed).await?;
    }

    let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl);
    let app = http::router(system.app_state(tokens, config.health_timeout));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its clients are gone; let the actors drain.
    system.shutdown().await?;

    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
