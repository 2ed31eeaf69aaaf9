#![cfg(test)]
use std::path::PathBuf;

use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fresh, migrated SQLite database backed by a temp file.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let path = std::env::temp_dir().join(format!("zoo_service_{}.db", uuid::Uuid::new_v4()));
    let cfg = configs::DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 1,
        min_connections: 1,
        ..configs::DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Unique, not yet created directory under the system temp dir.
pub fn temp_storage_dir() -> PathBuf {
    std::env::temp_dir().join(format!("zoo_exports_{}", uuid::Uuid::new_v4()))
}
