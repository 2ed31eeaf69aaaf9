use super::setup_test_db;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

#[tokio::test]
async fn test_connect_and_migrate_sqlite() -> Result<()> {
    let db = setup_test_db().await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);

    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = 'animal'",
        ))
        .await?
        .expect("row");
    let n: i64 = row.try_get("", "n")?;
    assert_eq!(n, 1);
    Ok(())
}

#[tokio::test]
async fn test_species_index_created() -> Result<()> {
    let db = setup_test_db().await?;
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'index' AND name = 'idx_animal_species'",
        ))
        .await?
        .expect("row");
    let n: i64 = row.try_get("", "n")?;
    assert_eq!(n, 1);
    Ok(())
}
