//! Create `item_category` join table holding each item's category set.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemCategory::Table)
                    .if_not_exists()
                    .col(uuid(ItemCategory::ItemId).not_null())
                    .col(uuid(ItemCategory::CategoryId).not_null())
                    .primary_key(
                        Index::create()
                            .col(ItemCategory::ItemId)
                            .col(ItemCategory::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_category_item")
                            .from(ItemCategory::Table, ItemCategory::ItemId)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_category_category")
                            .from(ItemCategory::Table, ItemCategory::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ItemCategory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ItemCategory { Table, ItemId, CategoryId }

#[derive(DeriveIden)]
enum Item { Table, Id }

#[derive(DeriveIden)]
enum Category { Table, Id }
