use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lookups by display value back create-if-absent
        manager
            .create_index(
                Index::create()
                    .name("idx_brand_name")
                    .table(Brand::Table)
                    .col(Brand::BrandName)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_category_name")
                    .table(Category::Table)
                    .col(Category::Name)
                    .to_owned(),
            )
            .await?;

        // Dependent lookups for the delete guards
        manager
            .create_index(
                Index::create()
                    .name("idx_item_brand")
                    .table(Item::Table)
                    .col(Item::BrandId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_item_category_category")
                    .table(ItemCategory::Table)
                    .col(ItemCategory::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_brand_name").table(Brand::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_category_name").table(Category::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_item_brand").table(Item::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_item_category_category").table(ItemCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Brand { Table, BrandName }

#[derive(DeriveIden)]
enum Category { Table, Name }

#[derive(DeriveIden)]
enum Item { Table, BrandId }

#[derive(DeriveIden)]
enum ItemCategory { Table, CategoryId }
