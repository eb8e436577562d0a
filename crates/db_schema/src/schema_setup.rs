use anyhow::anyhow;
use chirp_utils::error::ChirpResult;
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../../migrations");

/// Runs pending migrations over a synchronous connection, as diesel_migrations
/// doesn't support async.
pub fn run(db_url: &str) -> ChirpResult<()> {
  let mut conn = PgConnection::establish(db_url)?;
  info!("Running database migrations (this may take a while)...");
  conn
    .run_pending_migrations(MIGRATIONS)
    .map_err(|e| anyhow!("Couldn't run DB migrations: {e}"))?;
  info!("Database migrations complete");
  Ok(())
}
