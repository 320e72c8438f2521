use sea_orm_migration::prelude::*;

// Reads DATABASE_URL and applies or reverts the bot schema.
#[cfg(not(test))]
#[tokio::main]
async fn main() {
    use migration::Migrator;

    cli::run_cli(Migrator).await;
}

#[cfg(test)]
fn main() {}
