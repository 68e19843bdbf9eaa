use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use medqueue_api::config::ApiConfig;
use medqueue_core::scheduler::Scheduler;
use medqueue_db::{create_pool, schema::initialize_database, store::PgSchedulerStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let scheduler = Scheduler::new(Arc::new(PgSchedulerStore::new(db_pool)), config.scheduler);

    // Start API server
    medqueue_api::start_server(config, scheduler).await?;

    Ok(())
}
