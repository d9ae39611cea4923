pub use config::{DbConnectConfig, DbOptionsConfig, PostgresDbConfig};
pub use connect::{SqlConnect, connect_postgres_db};
pub use deadpool_postgres::{Object, Pool, PoolError};
pub use migrator::{Migration, MigrationError, SqlMigrator};
pub use tokio_postgres::Error as PgError;

pub mod config;
mod connect;
mod migrator;

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid database url: {0}")]
    InvalidUrl(#[from] tokio_postgres::Error),
    #[error("failed to build pool: {0}")]
    Build(#[from] deadpool_postgres::BuildError),
}
