use deadpool_postgres::Pool;
use tracing::{info, instrument};

use crate::{PgError, PoolError};

/// A named SQL script applied at most once.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("migration {name} failed: {source}")]
    Failed {
        name: &'static str,
        #[source]
        source: PgError,
    },
    #[error("database error: {0}")]
    Database(#[from] PgError),
}

/// SQL-based migration runner over plain `.sql` scripts, tracked in a
/// `_migrations` table.
pub struct SqlMigrator {
    pool: Pool,
}

impl SqlMigrator {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    /// Applies every migration not yet recorded, in order, each inside its
    /// own transaction. Returns the names that ran.
    #[instrument(skip_all)]
    pub async fn run(
        &self, migrations: &[Migration],
    ) -> Result<Vec<&'static str>, MigrationError> {
        let mut client = self.pool.get().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS _migrations (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(255) NOT NULL UNIQUE,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
            )
            .await?;

        let mut applied = Vec::new();
        for migration in migrations {
            let row = client
                .query_one(
                    "SELECT COUNT(*) FROM _migrations WHERE name = $1",
                    &[&migration.name],
                )
                .await?;
            let count: i64 = row.get(0);
            if count > 0 {
                info!("Migration {} already applied, skipping", migration.name);
                continue;
            }

            info!("Running migration: {}", migration.name);
            let tx = client.transaction().await?;
            tx.batch_execute(migration.sql).await.map_err(|source| {
                MigrationError::Failed {
                    name: migration.name,
                    source,
                }
            })?;
            tx.execute(
                "INSERT INTO _migrations (name, applied_at) VALUES ($1, NOW())",
                &[&migration.name],
            )
            .await?;
            tx.commit().await?;
            applied.push(migration.name);
        }

        Ok(applied)
    }
}
