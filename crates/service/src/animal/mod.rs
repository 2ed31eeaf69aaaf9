pub mod repository;
pub mod service;

use serde::Deserialize;

use crate::errors::ServiceError;
use models::animal::NewAnimal;

/// Create/update request body. Fields are optional so that missing values
/// are reported as field errors rather than as a deserialization failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnimalInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

impl AnimalInput {
    pub fn new(name: &str, species: &str, age: i64) -> Self {
        Self { name: Some(name.to_string()), species: Some(species.to_string()), age: Some(age) }
    }

    pub fn validate(&self) -> Result<NewAnimal, ServiceError> {
        let valid = models::animal::validate(self.name.as_deref(), self.species.as_deref(), self.age)?;
        Ok(valid)
    }
}
