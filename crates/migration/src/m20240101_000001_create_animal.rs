//! Create `animal` table.
//! Holds one row per zoo animal; timestamps and the lowercased search
//! columns are maintained by the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Animal::Table)
                    .if_not_exists()
                    .col(pk_auto(Animal::Id))
                    .col(string_len(Animal::Name, 100))
                    .col(string_len(Animal::Species, 100))
                    .col(integer(Animal::Age))
                    .col(timestamp_with_time_zone_null(Animal::CreatedAt))
                    .col(timestamp_with_time_zone_null(Animal::UpdatedAt))
                    .col(string(Animal::NameLc).default(""))
                    .col(string(Animal::SpeciesLc).default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Animal::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Animal {
    Table,
    Id,
    Name,
    Species,
    Age,
    CreatedAt,
    UpdatedAt,
    NameLc,
    SpeciesLc,
}
