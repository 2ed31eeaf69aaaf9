use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::animal::repository::AnimalRepository;
use crate::animal::AnimalInput;
use crate::errors::ServiceError;
use crate::export::{ExportFormat, ExportedFile, FileStorage};
use models::animal::Model;

/// Application service for the animal registry.
/// Validates input, turns missing rows into `NotFound`, and drives exports.
pub struct AnimalService<R: AnimalRepository> {
    repo: Arc<R>,
    files: FileStorage,
}

impl<R: AnimalRepository> AnimalService<R> {
    pub fn new(repo: Arc<R>, files: FileStorage) -> Self { Self { repo, files } }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &AnimalInput) -> Result<Model, ServiceError> {
        let valid = input.validate()?;
        let created = self.repo.create(&valid).await?;
        info!(id = created.id, name = %created.name, species = %created.species, "animal created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        let all = self.repo.list().await?;
        info!(count = all.len(), "list animals");
        Ok(all)
    }

    pub async fn get(&self, id: i32) -> Result<Model, ServiceError> {
        match self.repo.get(id).await? {
            Some(m) => Ok(m),
            None => {
                warn!(id, "animal not found");
                Err(ServiceError::NotFound(format!("animal with id {} not found", id)))
            }
        }
    }

    pub async fn by_species(&self, species: &str) -> Result<Vec<Model>, ServiceError> {
        info!(%species, "search animals by species");
        self.repo.by_species(species).await
    }

    /// Animals of any of the given species; blank entries are ignored.
    pub async fn by_species_in(&self, species: &[String]) -> Result<Vec<Model>, ServiceError> {
        let wanted: Vec<String> = species
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        info!(species = ?wanted, "search animals by species set");
        self.repo.by_species_in(&wanted).await
    }

    pub async fn by_name(&self, name: &str) -> Result<Vec<Model>, ServiceError> {
        info!(%name, "search animals by name");
        self.repo.by_name(name).await
    }

    pub async fn by_name_prefix(&self, prefix: &str) -> Result<Vec<Model>, ServiceError> {
        info!(%prefix, "search animals by name prefix");
        self.repo.by_name_prefix(prefix).await
    }

    pub async fn younger_than(&self, age: i32) -> Result<Vec<Model>, ServiceError> {
        info!(age, "search animals younger than");
        self.repo.younger_than(age).await
    }

    pub async fn older_than(&self, age: i32) -> Result<Vec<Model>, ServiceError> {
        info!(age, "search animals older than");
        self.repo.older_than(age).await
    }

    pub async fn by_age_range(&self, min: i32, max: i32) -> Result<Vec<Model>, ServiceError> {
        info!(min, max, "search animals by age range");
        self.repo.by_age_range(min, max).await
    }

    pub async fn by_species_and_age_range(&self, species: &str, min: i32, max: i32) -> Result<Vec<Model>, ServiceError> {
        info!(%species, min, max, "search animals by species and age range");
        self.repo.by_species_and_age_range(species, min, max).await
    }

    pub async fn species(&self) -> Result<Vec<String>, ServiceError> {
        self.repo.species().await
    }

    pub async fn count_by_species(&self, species: &str) -> Result<u64, ServiceError> {
        let n = self.repo.count_by_species(species).await?;
        info!(%species, count = n, "count animals by species");
        Ok(n)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &AnimalInput) -> Result<Model, ServiceError> {
        let valid = input.validate()?;
        match self.repo.update(id, &valid).await {
            Ok(m) => {
                info!(id, "animal updated");
                Ok(m)
            }
            Err(ServiceError::NotFound(_)) => {
                warn!(id, "update of missing animal");
                Err(ServiceError::NotFound(format!("animal with id {} not found", id)))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? {
            info!(id, "animal deleted");
            Ok(())
        } else {
            warn!(id, "delete of missing animal");
            Err(ServiceError::NotFound(format!("animal with id {} not found", id)))
        }
    }

    pub async fn delete_all(&self) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_all().await?;
        info!(removed, "all animals deleted");
        Ok(removed)
    }

    /// Snapshot the whole store into a new file; returns the file path.
    pub async fn export(&self, format: ExportFormat) -> Result<String, ServiceError> {
        let all = self.repo.list().await?;
        self.files.export(format, &all).await
    }

    pub async fn exported_files(&self) -> Vec<String> {
        self.files.list_files().await
    }

    pub async fn load_export(&self, filename: &str) -> Result<ExportedFile, ServiceError> {
        self.files.load(filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::repository::SeaOrmAnimalRepository;
    use crate::test_support::{get_db, temp_storage_dir};

    async fn service() -> Result<(AnimalService<SeaOrmAnimalRepository>, std::path::PathBuf), anyhow::Error> {
        let db = get_db().await?;
        let dir = temp_storage_dir();
        let files = FileStorage::new(&dir).await?;
        Ok((AnimalService::new(Arc::new(SeaOrmAnimalRepository { db }), files), dir))
    }

    #[tokio::test]
    async fn create_then_get_round_trips_fields() -> Result<(), anyhow::Error> {
        let (svc, dir) = service().await?;
        let created = svc.create(&AnimalInput::new("Leo", "Lion", 5)).await?;
        let fetched = svc.get(created.id).await?;
        assert_eq!((fetched.name.as_str(), fetched.species.as_str(), fetched.age), ("Leo", "Lion", 5));
        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() -> Result<(), anyhow::Error> {
        let (svc, dir) = service().await?;
        let err = svc.create(&AnimalInput::new("L", "Lion", -3)).await.unwrap_err();
        assert!(err.is_validation());
        let fields: Vec<_> = err.field_errors().unwrap().iter().map(|f| f.field).collect();
        assert_eq!(fields, vec!["name", "age"]);
        assert!(svc.list().await?.is_empty());
        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_mutable_fields() -> Result<(), anyhow::Error> {
        let (svc, dir) = service().await?;
        let created = svc.create(&AnimalInput::new("Leo", "Lion", 5)).await?;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let updated = svc.update(created.id, &AnimalInput::new("Simba", "Lion", 6)).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Simba");
        assert_eq!(updated.age, 6);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> Result<(), anyhow::Error> {
        let (svc, dir) = service().await?;
        assert!(matches!(svc.get(99).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update(99, &AnimalInput::new("Leo", "Lion", 1)).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(99).await, Err(ServiceError::NotFound(_))));

        let created = svc.create(&AnimalInput::new("Leo", "Lion", 5)).await?;
        svc.delete(created.id).await?;
        assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(created.id).await, Err(ServiceError::NotFound(_))));
        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn species_filters_agree_on_case() -> Result<(), anyhow::Error> {
        let (svc, dir) = service().await?;
        for (n, s, a) in [("Leo", "Lion", 5), ("Nala", "Lion", 3), ("Симба", "Лев", 4), ("Marty", "Zebra", 7)] {
            svc.create(&AnimalInput::new(n, s, a)).await?;
        }
        assert_eq!(svc.by_species("lion").await?.len(), 2);
        assert_eq!(svc.count_by_species("lion").await?, 2);
        assert_eq!(svc.by_species_and_age_range("lion", 0, 100).await?.len(), 2);
        assert_eq!(svc.count_by_species("ЛЕВ").await?, 1);

        let set = vec![" zebra ".to_string(), String::new(), "лев".to_string()];
        let names: Vec<String> = svc.by_species_in(&set).await?.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Симба", "Marty"]);
        assert_eq!(svc.by_name_prefix("na").await?.len(), 1);
        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_validates_before_lookup() -> Result<(), anyhow::Error> {
        let (svc, dir) = service().await?;
        let err = svc.update(99, &AnimalInput::default()).await.unwrap_err();
        assert!(err.is_validation());
        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn export_snapshots_current_store() -> Result<(), anyhow::Error> {
        let (svc, dir) = service().await?;
        for (n, s, a) in [("Leo", "Lion", 5), ("Dumbo", "Elephant", 12)] {
            svc.create(&AnimalInput::new(n, s, a)).await?;
        }

        let path = svc.export(ExportFormat::Csv).await?;
        let csv = tokio::fs::read_to_string(&path).await?;
        assert_eq!(csv.lines().count(), 1 + 2);

        let path = svc.export(ExportFormat::Json).await?;
        let rows: Vec<serde_json::Value> = serde_json::from_str(&tokio::fs::read_to_string(&path).await?)?;
        assert_eq!(rows.len(), 2);

        let files = svc.exported_files().await;
        assert_eq!(files.len(), 2);
        for f in &files {
            assert!(!svc.load_export(f).await?.bytes.is_empty());
        }
        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }
}
