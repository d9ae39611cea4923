use anyhow::Result;
use events_dao::EVENT_MIGRATIONS;
use sql_connection::{Migration, MigrationError, SqlMigrator};
use test_utils::TestPostgresContainer;

async fn applied_names(postgres: &TestPostgresContainer) -> Result<Vec<String>> {
    let client = postgres.pool.get().await?;
    let rows = client
        .query("SELECT name FROM _migrations ORDER BY id", &[])
        .await?;
    Ok(rows.iter().map(|row| row.get(0)).collect())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_events_schema_is_applied_once() -> Result<()> {
    let postgres = TestPostgresContainer::new().await?;

    let applied = applied_names(&postgres).await?;
    assert_eq!(applied, vec!["001_create_events".to_string()]);

    let rerun = SqlMigrator::new(postgres.pool.clone())
        .run(EVENT_MIGRATIONS)
        .await?;
    assert!(rerun.is_empty());
    assert_eq!(applied_names(&postgres).await?.len(), 1);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_new_migration_runs_after_existing_ones() -> Result<()> {
    let postgres = TestPostgresContainer::new().await?;
    let extra = [Migration {
        name: "002_custom_test",
        sql: "CREATE TABLE custom_test (id SERIAL PRIMARY KEY, name TEXT);",
    }];

    let applied = SqlMigrator::new(postgres.pool.clone()).run(&extra).await?;

    assert_eq!(applied, vec!["002_custom_test"]);
    postgres
        .execute_sql("INSERT INTO custom_test (name) VALUES ('test')")
        .await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_failed_migration_is_not_recorded() -> Result<()> {
    let postgres = TestPostgresContainer::new().await?;
    let broken = [Migration {
        name: "002_broken",
        sql: "CREATE TABLE broken (id NOT_A_TYPE);",
    }];

    let result = SqlMigrator::new(postgres.pool.clone()).run(&broken).await;

    assert!(matches!(
        result,
        Err(MigrationError::Failed {
            name: "002_broken",
            ..
        })
    ));
    assert!(!applied_names(&postgres).await?.contains(&"002_broken".to_string()));
    Ok(())
}
