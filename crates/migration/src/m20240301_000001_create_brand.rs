//! Create `brand` table.
//!
//! Brand names are not unique at the schema level; uniqueness is a
//! find-then-create check in the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brand::Table)
                    .if_not_exists()
                    .col(uuid(Brand::Id).primary_key())
                    .col(string_len(Brand::BrandName, 256).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Brand::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Brand { Table, Id, BrandName }
