use axum_helpers::server::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::PgUserRepository;
use tracing::info;

mod api;
mod config;
mod db;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = match &config.database {
        Some(database) => {
            let db = db::connect(database)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            PgUserRepository::new(db.clone())
                .ensure_schema()
                .await
                .map_err(|e| eyre::eyre!("Failed to prepare users table: {}", e))?;
            Some(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory");
            None
        }
    };

    let state = AppState { config, db };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // /health: liveness check with app name/version
    let app = router.merge(health_router(state.config.app));

    create_app(app, &state.config.server).await?;

    if let Some(db) = state.db {
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    }

    info!("Rental API shutdown complete");
    Ok(())
}
