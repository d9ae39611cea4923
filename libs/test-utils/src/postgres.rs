use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_postgres::{
    Manager, ManagerConfig, Pool as PostgresPool, RecyclingMethod,
};
use events_dao::EVENT_MIGRATIONS;
use sql_connection::{SqlConnect, SqlMigrator};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio_postgres::NoTls;

/// PostgreSQL test container with the `events` schema applied.
pub struct TestPostgresContainer {
    pub pool: PostgresPool,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container: ContainerAsync<Postgres>,
}

impl TestPostgresContainer {
    pub async fn new() -> Result<Self> {
        let container = Postgres::default()
            .with_env_var("POSTGRES_DB", "testdb")
            .with_env_var("POSTGRES_USER", "testuser")
            .with_env_var("POSTGRES_PASSWORD", "testpass")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let connection_string = format!(
            "postgresql://testuser:testpass@{host}:{port}/testdb"
        );

        let pool = Self::create_pool(&connection_string).await?;

        SqlMigrator::new(pool.clone())
            .run(EVENT_MIGRATIONS)
            .await
            .context("Failed to apply migrations")?;

        Ok(Self {
            pool,
            connection_string,
            _container: container,
        })
    }

    async fn create_pool(connection_string: &str) -> Result<PostgresPool> {
        let pg_config =
            connection_string.parse::<tokio_postgres::Config>()?;

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

        let pool = PostgresPool::builder(mgr)
            .max_size(10)
            .build()
            .context("Failed to build PostgreSQL connection pool")?;

        let mut attempts = 0;
        loop {
            let ready = match pool.get().await {
                Ok(client) => client.query_one("SELECT 1", &[]).await.is_ok(),
                Err(_) => false,
            };
            if ready {
                break;
            }
            attempts += 1;
            if attempts >= 20 {
                anyhow::bail!("PostgreSQL not ready after {attempts} attempts");
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }

        Ok(pool)
    }

    pub fn sql_connect(&self) -> SqlConnect { SqlConnect::new(self.pool.clone()) }

    pub async fn execute_sql(&self, sql: &str) -> Result<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(sql)
            .await
            .context("Failed to execute SQL")?;
        Ok(())
    }
}
