use std::time::Duration;

use deadpool_postgres::{
    Manager, ManagerConfig, Object, Pool, PoolError, RecyclingMethod,
};
use tokio_postgres::NoTls;
use tracing::{debug, info, instrument};

use crate::{
    ConnectError,
    config::{DbConnectConfig, DbOptionsConfig},
};

#[derive(Debug, Clone)]
pub struct SqlConnect {
    pool: Pool,
}

impl SqlConnect {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    pub async fn get_client(&self) -> Result<Object, PoolError> {
        self.pool.get().await
    }

    pub fn pool(&self) -> &Pool { &self.pool }
}

#[instrument(skip_all, name = "connect-pgsql")]
pub async fn connect_postgres_db<C>(
    config: &C,
) -> Result<SqlConnect, ConnectError>
where
    C: DbConnectConfig + DbOptionsConfig,
{
    info!(postgres.max_conn = ?config.max_conn());

    let pg_config = config.uri().parse::<tokio_postgres::Config>()?;

    let mgr_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

    let mut pool_builder = Pool::builder(mgr)
        .runtime(deadpool_postgres::Runtime::Tokio1)
        .wait_timeout(Some(Duration::from_millis(2000)))
        .create_timeout(Some(Duration::from_millis(5000)))
        .recycle_timeout(Some(Duration::from_millis(100)));

    if let Some(max_conn) = config.max_conn() {
        pool_builder = pool_builder.max_size(max_conn as usize);
    }

    let pool = pool_builder.build()?;
    debug!(max_size = pool.status().max_size, "postgres pool built");

    Ok(SqlConnect::new(pool))
}
