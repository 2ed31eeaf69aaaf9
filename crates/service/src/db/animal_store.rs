use sea_orm::{
    sea_query::{Expr, LikeExpr, SimpleExpr},
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use models::animal::{self, search_key, Entity as AnimalEntity, NewAnimal};
use crate::errors::ServiceError;

/// Folded `needle` with LIKE metacharacters escaped by `\`.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for ch in search_key(needle).chars() {
        if matches!(ch, '%' | '_' | '\\') { out.push('\\'); }
        out.push(ch);
    }
    out
}

/// `%needle%` against a lowercased search column.
pub(crate) fn contains_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(needle))
}

/// `needle%` against a lowercased search column.
pub(crate) fn prefix_pattern(needle: &str) -> String {
    format!("{}%", escape_like(needle))
}

fn like(col: animal::Column, pattern: String) -> SimpleExpr {
    Expr::col(col).like(LikeExpr::new(pattern).escape('\\'))
}

/// Species equality ignoring case; every species filter goes through here.
fn species_is(species: &str) -> SimpleExpr {
    animal::Column::SpeciesLc.eq(search_key(species))
}

async fn fetch(db: &DatabaseConnection, cond: SimpleExpr) -> Result<Vec<animal::Model>, ServiceError> {
    let rows = AnimalEntity::find()
        .filter(cond)
        .order_by_asc(animal::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// List every animal in storage order.
pub async fn list_animals(db: &DatabaseConnection) -> Result<Vec<animal::Model>, ServiceError> {
    Ok(AnimalEntity::find().order_by_asc(animal::Column::Id).all(db).await?)
}

/// Get an animal by id.
pub async fn get_animal(db: &DatabaseConnection, id: i32) -> Result<Option<animal::Model>, ServiceError> {
    Ok(AnimalEntity::find_by_id(id).one(db).await?)
}

/// Insert a validated animal; id and timestamps are assigned here.
pub async fn create_animal(db: &DatabaseConnection, input: &NewAnimal) -> Result<animal::Model, ServiceError> {
    let created = animal::create(db, input).await?;
    Ok(created)
}

/// Overwrite name/species/age inside one transaction.
pub async fn update_animal(db: &DatabaseConnection, id: i32, input: &NewAnimal) -> Result<animal::Model, ServiceError> {
    let txn = db.begin().await?;
    let current = AnimalEntity::find_by_id(id).one(&txn).await?;
    let Some(existing) = current else {
        txn.rollback().await?;
        return Err(ServiceError::not_found("animal"));
    };
    let updated = animal::apply_update(&txn, existing, input).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Delete an animal; returns true if a row was removed.
pub async fn delete_animal(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = AnimalEntity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Remove every animal; returns the number of deleted rows.
pub async fn delete_all_animals(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    let res = AnimalEntity::delete_many().exec(db).await?;
    Ok(res.rows_affected)
}

pub async fn find_by_species(db: &DatabaseConnection, species: &str) -> Result<Vec<animal::Model>, ServiceError> {
    fetch(db, species_is(species)).await
}

/// Animals whose species is any of `species`, ignoring case.
pub async fn find_by_species_in(db: &DatabaseConnection, species: &[String]) -> Result<Vec<animal::Model>, ServiceError> {
    if species.is_empty() {
        return Ok(Vec::new());
    }
    let keys: Vec<String> = species.iter().map(|s| search_key(s)).collect();
    fetch(db, animal::Column::SpeciesLc.is_in(keys)).await
}

pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Vec<animal::Model>, ServiceError> {
    fetch(db, like(animal::Column::NameLc, contains_pattern(name))).await
}

pub async fn find_by_name_prefix(db: &DatabaseConnection, prefix: &str) -> Result<Vec<animal::Model>, ServiceError> {
    fetch(db, like(animal::Column::NameLc, prefix_pattern(prefix))).await
}

pub async fn find_younger_than(db: &DatabaseConnection, age: i32) -> Result<Vec<animal::Model>, ServiceError> {
    fetch(db, animal::Column::Age.lt(age)).await
}

pub async fn find_older_than(db: &DatabaseConnection, age: i32) -> Result<Vec<animal::Model>, ServiceError> {
    fetch(db, animal::Column::Age.gt(age)).await
}

/// Inclusive range; `min > max` simply matches nothing.
pub async fn find_by_age_range(db: &DatabaseConnection, min: i32, max: i32) -> Result<Vec<animal::Model>, ServiceError> {
    fetch(db, animal::Column::Age.between(min, max)).await
}

/// Species (ignoring case) combined with an inclusive age range.
pub async fn find_by_species_and_age_range(
    db: &DatabaseConnection,
    species: &str,
    min: i32,
    max: i32,
) -> Result<Vec<animal::Model>, ServiceError> {
    fetch(db, species_is(species).and(animal::Column::Age.between(min, max))).await
}

/// Distinct species, ascending.
pub async fn list_species(db: &DatabaseConnection) -> Result<Vec<String>, ServiceError> {
    let species = AnimalEntity::find()
        .select_only()
        .column(animal::Column::Species)
        .distinct()
        .order_by_asc(animal::Column::Species)
        .into_tuple::<String>()
        .all(db)
        .await?;
    Ok(species)
}

/// Number of animals of `species`, ignoring case.
pub async fn count_by_species(db: &DatabaseConnection, species: &str) -> Result<u64, ServiceError> {
    let n = AnimalEntity::find().filter(species_is(species)).count(db).await?;
    Ok(n)
}
