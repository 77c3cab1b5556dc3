use anyhow::Context;
use diesel::{Connection, PgConnection};
use diesel_async::pooled_connection::deadpool::Hook;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::*;

use crate::config::AppCfg;
use crate::services::Pool;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn build_pool(cfg: &AppCfg) -> anyhow::Result<Pool> {
    // create a new connection pool with the default config
    let mgr =
        AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(&cfg.database_url);

    info!(max_size = cfg.pool_size, "Starting DB pool");
    let pool = Pool::builder(mgr)
        .max_size(cfg.pool_size)
        .pre_recycle(Hook::sync_fn(|_conn, metrics| {
            trace!(target: "dbpool::pre_recycle", ?metrics, "Pre-recycle");
            Ok(())
        }))
        .post_create(Hook::sync_fn(|_conn, metrics| {
            trace!(target: "dbpool::post_create", ?metrics, "Post-create");
            Ok(())
        }))
        .runtime(deadpool::Runtime::Tokio1)
        .build()?;
    Ok(pool)
}

/// What to do with the embedded migrations before serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaAction {
    /// Apply whatever is pending.
    Migrate,
    /// Revert everything, then apply everything: the drop-all/create-all reset.
    Reset,
}

/// Runs on a blocking thread; the harness needs a synchronous connection.
pub async fn prepare_schema(database_url: &str, action: SchemaAction) -> anyhow::Result<()> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let mut conn = PgConnection::establish(&url).context("connecting for migrations")?;
        if action == SchemaAction::Reset {
            let reverted = conn
                .revert_all_migrations(MIGRATIONS)
                .map_err(|e| anyhow::anyhow!(e))?;
            info!(count = reverted.len(), "Reverted migrations");
        }
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!(e))?;
        info!(count = applied.len(), "Applied migrations");
        Ok(())
    })
    .await?
}
