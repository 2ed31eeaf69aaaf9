use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::db::animal_store;
use crate::errors::ServiceError;
use models::animal::{Model, NewAnimal};

#[async_trait]
pub trait AnimalRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError>;
    async fn create(&self, input: &NewAnimal) -> Result<Model, ServiceError>;
    async fn update(&self, id: i32, input: &NewAnimal) -> Result<Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn delete_all(&self) -> Result<u64, ServiceError>;
    async fn by_species(&self, species: &str) -> Result<Vec<Model>, ServiceError>;
    async fn by_species_in(&self, species: &[String]) -> Result<Vec<Model>, ServiceError>;
    async fn by_name(&self, name: &str) -> Result<Vec<Model>, ServiceError>;
    async fn by_name_prefix(&self, prefix: &str) -> Result<Vec<Model>, ServiceError>;
    async fn younger_than(&self, age: i32) -> Result<Vec<Model>, ServiceError>;
    async fn older_than(&self, age: i32) -> Result<Vec<Model>, ServiceError>;
    async fn by_age_range(&self, min: i32, max: i32) -> Result<Vec<Model>, ServiceError>;
    async fn by_species_and_age_range(&self, species: &str, min: i32, max: i32) -> Result<Vec<Model>, ServiceError>;
    async fn species(&self) -> Result<Vec<String>, ServiceError>;
    async fn count_by_species(&self, species: &str) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmAnimalRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl AnimalRepository for SeaOrmAnimalRepository {
    async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        animal_store::list_animals(&self.db).await
    }

    async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError> {
        animal_store::get_animal(&self.db, id).await
    }

    async fn create(&self, input: &NewAnimal) -> Result<Model, ServiceError> {
        animal_store::create_animal(&self.db, input).await
    }

    async fn update(&self, id: i32, input: &NewAnimal) -> Result<Model, ServiceError> {
        animal_store::update_animal(&self.db, id, input).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        animal_store::delete_animal(&self.db, id).await
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        animal_store::delete_all_animals(&self.db).await
    }

    async fn by_species(&self, species: &str) -> Result<Vec<Model>, ServiceError> {
        animal_store::find_by_species(&self.db, species).await
    }

    async fn by_species_in(&self, species: &[String]) -> Result<Vec<Model>, ServiceError> {
        animal_store::find_by_species_in(&self.db, species).await
    }

    async fn by_name(&self, name: &str) -> Result<Vec<Model>, ServiceError> {
        animal_store::find_by_name(&self.db, name).await
    }

    async fn by_name_prefix(&self, prefix: &str) -> Result<Vec<Model>, ServiceError> {
        animal_store::find_by_name_prefix(&self.db, prefix).await
    }

    async fn younger_than(&self, age: i32) -> Result<Vec<Model>, ServiceError> {
        animal_store::find_younger_than(&self.db, age).await
    }

    async fn older_than(&self, age: i32) -> Result<Vec<Model>, ServiceError> {
        animal_store::find_older_than(&self.db, age).await
    }

    async fn by_age_range(&self, min: i32, max: i32) -> Result<Vec<Model>, ServiceError> {
        animal_store::find_by_age_range(&self.db, min, max).await
    }

    async fn by_species_and_age_range(&self, species: &str, min: i32, max: i32) -> Result<Vec<Model>, ServiceError> {
        animal_store::find_by_species_and_age_range(&self.db, species, min, max).await
    }

    async fn species(&self) -> Result<Vec<String>, ServiceError> {
        animal_store::list_species(&self.db).await
    }

    async fn count_by_species(&self, species: &str) -> Result<u64, ServiceError> {
        animal_store::count_by_species(&self.db, species).await
    }
}
