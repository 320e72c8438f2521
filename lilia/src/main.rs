mod config;
mod discord;

use anyhow::Result;
use config::Config;
use discord::start_discord;
use lilia_db::LiliaDb;
use tracing::info;

async fn init_db(config: &Config) -> Result<LiliaDb> {
    info!("db starting");
    let db = LiliaDb::connect(&config.database_url, config.max_connections).await?;
    info!("DB connected");
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::from_env()?;
    let db = init_db(&config).await?;
    start_discord(db, config).await?;
    Ok(())
}
