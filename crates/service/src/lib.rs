//! Service layer for the animal registry.
//! - `db` holds the parameterized queries against the `animal` table.
//! - `animal` wraps them behind a repository trait and the `AnimalService` facade.
//! - `export` renders the record set to files and serves them back.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod db;
pub mod animal;
pub mod export;
