//! Provisioning binary: creates the database schema and seeds the initial
//! departments, groups, and administrator account from config.toml.

use dotenvy::dotenv;
use pimenta_de_cheiro::{config, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the seed configuration
    let seed_config = config::seed::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Tables created."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed departments, groups, and the administrator account
    config::seed::seed_defaults(&db, &seed_config)
        .await
        .inspect(|_| info!("Initial data seeded successfully."))
        .inspect_err(|e| error!("Failed to seed initial data: {e}"))?;

    Ok(())
}
