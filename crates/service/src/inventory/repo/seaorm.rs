use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, TransactionTrait};
use uuid::Uuid;

use models::{brand, category, item};
use models::item::ItemFields;

use crate::errors::ServiceError;
use crate::inventory::domain::{Brand, Category, ItemDetail, ItemListing, ItemRecord, NewItem};
use crate::inventory::repository::InventoryRepository;

pub struct SeaOrmInventoryRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmInventoryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn fields(item: &NewItem) -> ItemFields<'_> {
    ItemFields { name: &item.name, brand_id: item.brand_id, count: item.count, category_ids: &item.category_ids }
}

#[async_trait::async_trait]
impl InventoryRepository for SeaOrmInventoryRepository {
    async fn list_brands(&self) -> Result<Vec<Brand>, ServiceError> {
        let rows = brand::find_sorted().all(&self.db).await?;
        Ok(rows.into_iter().map(Brand::from).collect())
    }

    async fn find_brand(&self, id: Uuid) -> Result<Option<Brand>, ServiceError> {
        Ok(brand::Entity::find_by_id(id).one(&self.db).await?.map(Brand::from))
    }

    async fn find_brand_by_name(&self, brand_name: &str) -> Result<Option<Brand>, ServiceError> {
        Ok(brand::find_by_name(&self.db, brand_name).await?.map(Brand::from))
    }

    async fn insert_brand(&self, brand_name: &str) -> Result<Brand, ServiceError> {
        Ok(brand::create(&self.db, brand_name).await?.into())
    }

    async fn update_brand(&self, id: Uuid, brand_name: &str) -> Result<Option<Brand>, ServiceError> {
        Ok(brand::rename(&self.db, id, brand_name).await?.map(Brand::from))
    }

    async fn delete_brand(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = brand::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        let rows = category::find_sorted().all(&self.db).await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, ServiceError> {
        Ok(category::Entity::find_by_id(id).one(&self.db).await?.map(Category::from))
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError> {
        Ok(category::find_by_name(&self.db, name).await?.map(Category::from))
    }

    async fn categories_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, ServiceError> {
        let rows = category::find_many(&self.db, ids).await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn insert_category(&self, name: &str) -> Result<Category, ServiceError> {
        Ok(category::create(&self.db, name).await?.into())
    }

    async fn update_category(&self, id: Uuid, name: &str) -> Result<Option<Category>, ServiceError> {
        Ok(category::rename(&self.db, id, name).await?.map(Category::from))
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_items(&self) -> Result<Vec<ItemListing>, ServiceError> {
        let rows = item::find_sorted().find_also_related(brand::Entity).all(&self.db).await?;
        Ok(rows.into_iter().map(ItemListing::from).collect())
    }

    async fn items_by_brand(&self, brand_id: Uuid) -> Result<Vec<ItemListing>, ServiceError> {
        let rows = item::find_sorted()
            .filter(item::Column::BrandId.eq(brand_id))
            .find_also_related(brand::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(ItemListing::from).collect())
    }

    async fn items_by_category(&self, category_id: Uuid) -> Result<Vec<ItemListing>, ServiceError> {
        let rows = item::in_category(category_id).find_also_related(brand::Entity).all(&self.db).await?;
        Ok(rows.into_iter().map(ItemListing::from).collect())
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<ItemDetail>, ServiceError> {
        let Some((found, owner)) = item::Entity::find_by_id(id).find_also_related(brand::Entity).one(&self.db).await? else {
            return Ok(None);
        };
        let categories = category::sorted(found.find_related(category::Entity)).all(&self.db).await?;
        Ok(Some(ItemDetail {
            id: found.id,
            name: found.name,
            brand_id: found.brand_id,
            brand: owner.map(Brand::from),
            categories: categories.into_iter().map(Category::from).collect(),
            count: found.count,
            updated: found.updated.with_timezone(&chrono::Utc),
        }))
    }

    async fn insert_item(&self, input: &NewItem) -> Result<ItemRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let created = item::create(&txn, &fields(input)).await?;
        txn.commit().await?;
        Ok(ItemRecord::from_model(created, input.category_ids.clone()))
    }

    async fn update_item(&self, id: Uuid, input: &NewItem) -> Result<Option<ItemRecord>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(updated) = item::replace(&txn, id, &fields(input)).await? else {
            txn.rollback().await?;
            return Ok(None);
        };
        txn.commit().await?;
        Ok(Some(ItemRecord::from_model(updated, input.category_ids.clone())))
    }

    async fn delete_item(&self, id: Uuid) -> Result<bool, ServiceError> {
        // join rows go with the item (ON DELETE CASCADE)
        let res = item::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
