use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "animal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub species: String,
    pub age: i32,
    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
    /// Lowercased copies of `name` and `species` that the text filters match on.
    #[serde(skip)]
    pub name_lc: String,
    #[serde(skip)]
    pub species_lc: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Case folding applied to stored search columns and to query input alike,
/// so non-ASCII text compares the same on every backend.
pub fn search_key(value: &str) -> String {
    value.to_lowercase()
}

/// Name, species and age after validation; the only fields callers may set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAnimal {
    pub name: String,
    pub species: String,
    pub age: i32,
}

fn check_text(field: &'static str, value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let Some(v) = value else {
        errors.push(FieldError::new(field, format!("{field} must not be blank")));
        return None;
    };
    if v.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} must not be blank")));
        return None;
    }
    let len = v.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        errors.push(FieldError::new(
            field,
            format!("{field} must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
        ));
        return None;
    }
    Some(v.to_string())
}

fn check_age(value: Option<i64>, errors: &mut Vec<FieldError>) -> Option<i32> {
    match value {
        None => {
            errors.push(FieldError::new("age", "age must not be null"));
            None
        }
        Some(a) if a < 0 => {
            errors.push(FieldError::new("age", "age must be a non-negative number"));
            None
        }
        Some(a) => match i32::try_from(a) {
            Ok(a) => Some(a),
            Err(_) => {
                errors.push(FieldError::new("age", format!("age must not exceed {}", i32::MAX)));
                None
            }
        },
    }
}

/// Validate raw request fields, collecting every problem instead of stopping at the first.
pub fn validate(name: Option<&str>, species: Option<&str>, age: Option<i64>) -> Result<NewAnimal, ModelError> {
    let mut errors = Vec::new();
    let name = check_text("name", name, &mut errors);
    let species = check_text("species", species, &mut errors);
    let age = check_age(age, &mut errors);
    match (name, species, age) {
        (Some(name), Some(species), Some(age)) if errors.is_empty() => Ok(NewAnimal { name, species, age }),
        _ => Err(ModelError::InvalidFields(errors)),
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, input: &NewAnimal) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        name: Set(input.name.clone()),
        species: Set(input.species.clone()),
        age: Set(input.age),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        name_lc: Set(search_key(&input.name)),
        species_lc: Set(search_key(&input.species)),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Overwrite the mutable fields of an existing row and refresh `updated_at`.
pub async fn apply_update<C: ConnectionTrait>(db: &C, existing: Model, input: &NewAnimal) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    am.name = Set(input.name.clone());
    am.species = Set(input.species.clone());
    am.age = Set(input.age);
    am.name_lc = Set(search_key(&input.name));
    am.species_lc = Set(search_key(&input.species));
    am.updated_at = Set(Some(Utc::now().into()));
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
