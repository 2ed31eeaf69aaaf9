use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::animal::{repository::SeaOrmAnimalRepository, service::AnimalService};
use service::export::FileStorage;

pub type Animals = AnimalService<SeaOrmAnimalRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub animals: Arc<Animals>,
}

impl ServerState {
    /// Wire the SeaORM repository and the export directory into the service.
    pub async fn new(db: DatabaseConnection, storage_dir: &str) -> anyhow::Result<Self> {
        let files = FileStorage::new(storage_dir).await?;
        let repo = Arc::new(SeaOrmAnimalRepository { db });
        Ok(Self { animals: Arc::new(AnimalService::new(repo, files)) })
    }
}
