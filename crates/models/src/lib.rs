pub mod errors;
pub mod db;
pub mod animal;

#[cfg(test)]
mod tests;
