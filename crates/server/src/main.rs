mod bootstrap;
mod customers;
mod dispatch;
mod health;

use std::sync::Arc;

use anyhow::Result;
use cadastro_core::config::{AppConfig, LoadOptions};
use cadastro_db::repositories::SqlCustomerRepository;

use crate::dispatch::Dispatcher;

fn init_logging(config: &AppConfig) {
    use cadastro_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    health::spawn(
        &app.config.server.bind_address,
        app.config.server.health_check_port,
        app.db_pool.clone(),
    )
    .await?;

    // The dispatcher registry is built once at startup; every request
    // kind must have its handler registered here.
    let repository = Arc::new(SqlCustomerRepository::new(app.db_pool.clone()));
    let dispatcher = Arc::new(Dispatcher::with_repository(repository));
    let router = customers::router(dispatcher);

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        bind_address = %address,
        "cadastro-server started"
    );

    axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown()).await?;

    tracing::info!(event_name = "system.server.stopping", "cadastro-server stopping");

    Ok(())
}

async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}
