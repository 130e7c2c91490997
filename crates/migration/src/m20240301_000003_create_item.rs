//! Create `item` table.
//!
//! The brand FK restricts deletes so a referenced brand cannot disappear
//! even if the service-level guard is raced.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(uuid(Item::Id).primary_key())
                    .col(string_len(Item::Name, 256).not_null())
                    .col(uuid(Item::BrandId).not_null())
                    .col(integer(Item::Count).not_null().default(0))
                    .col(timestamp_with_time_zone(Item::Updated).not_null())
                    .check(Expr::col(Item::Count).gte(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_brand")
                            .from(Item::Table, Item::BrandId)
                            .to(Brand::Table, Brand::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Item::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Item { Table, Id, Name, BrandId, Count, Updated }

#[derive(DeriveIden)]
enum Brand { Table, Id }
