use anyhow::Context;
use docdb_config::config;
use docdb_config::db::Database;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = config::init().context("Failed to load configuration")?;
    tracing::info!(
        region = %config.mongodb.region,
        endpoint = %config.mongodb.endpoint,
        user = %config.mongodb.user,
        "configuration ready"
    );

    let db_name = std::env::args().nth(1).unwrap_or_else(|| "admin".to_string());
    let db = Database::connect(&config.mongodb, &db_name).await?;
    tracing::info!("database {} ready", db.database().name());

    Ok(())
}
