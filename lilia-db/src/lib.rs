pub mod entity;
mod identity;
mod user;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::info;

pub use identity::{DiscordIdentity, ExternalIdentity};
pub use sea_orm::DbErr as SeaDbErr;
pub use user::get_or_create_user_in;

#[derive(Clone, Debug)]
pub struct LiliaDb {
    db: DatabaseConnection,
}

impl LiliaDb {
    /// Connects to `database_url` and brings the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(max_connections).min_connections(0);
        Self::connect_with(opt).await
    }

    pub async fn connect_with(opt: ConnectOptions) -> Result<Self> {
        let db: DatabaseConnection = Database::connect(opt).await?;
        Migrator::up(&db, None).await?;
        info!("database connected, migrations applied");
        Ok(Self { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Starts a transaction for callers that want to batch several record
    /// operations behind a single commit.
    pub async fn begin(&self) -> Result<DatabaseTransaction, SeaDbErr> {
        self.db.begin().await
    }

    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
        // every pooled sqlite memory connection is its own database
        opt.max_connections(1).min_connections(1);
        Self::connect_with(opt)
            .await
            .expect("in-memory sqlite should open")
    }
}
