use anyhow::Context;

use portfolio_api::config::AppConfig;
use portfolio_api::database::DatabaseManager;
use portfolio_api::routes::app;
use portfolio_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, NOTION_TOKEN, etc.
    let _ = dotenvy::dotenv();
    portfolio_api::init_tracing();

    let config = AppConfig::from_env();
    tracing::info!("Starting Portfolio API in {:?} mode", config.environment);

    let port = config.server.port;
    let run_migrations = config.database.run_migrations;
    let state = AppState::from_config(config).await?;

    if run_migrations {
        // The server still starts without a database; /health reports it
        if let Err(e) = DatabaseManager::migrate(&state.pool).await {
            tracing::error!("migrations not applied: {}", e);
        }
    }

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Portfolio API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
