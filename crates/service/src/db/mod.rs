//! Query functions operating directly on a SeaORM connection.

pub mod animal_store;
