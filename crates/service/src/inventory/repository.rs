use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use super::domain::{Brand, Category, ItemDetail, ItemListing, ItemRecord, NewItem};

/// Persistence contract for the inventory entities.
///
/// Listings come back sorted by their display field, case-insensitive.
/// Reference population is one level deep: items carry their brand, and
/// `find_item` also carries the categories.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn list_brands(&self) -> Result<Vec<Brand>, ServiceError>;
    async fn find_brand(&self, id: Uuid) -> Result<Option<Brand>, ServiceError>;
    async fn find_brand_by_name(&self, brand_name: &str) -> Result<Option<Brand>, ServiceError>;
    async fn insert_brand(&self, brand_name: &str) -> Result<Brand, ServiceError>;
    async fn update_brand(&self, id: Uuid, brand_name: &str) -> Result<Option<Brand>, ServiceError>;
    async fn delete_brand(&self, id: Uuid) -> Result<bool, ServiceError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError>;
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, ServiceError>;
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError>;
    async fn categories_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, ServiceError>;
    async fn insert_category(&self, name: &str) -> Result<Category, ServiceError>;
    async fn update_category(&self, id: Uuid, name: &str) -> Result<Option<Category>, ServiceError>;
    async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError>;

    async fn list_items(&self) -> Result<Vec<ItemListing>, ServiceError>;
    async fn items_by_brand(&self, brand_id: Uuid) -> Result<Vec<ItemListing>, ServiceError>;
    async fn items_by_category(&self, category_id: Uuid) -> Result<Vec<ItemListing>, ServiceError>;
    async fn find_item(&self, id: Uuid) -> Result<Option<ItemDetail>, ServiceError>;
    async fn insert_item(&self, item: &NewItem) -> Result<ItemRecord, ServiceError>;
    async fn update_item(&self, id: Uuid, item: &NewItem) -> Result<Option<ItemRecord>, ServiceError>;
    async fn delete_item(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};
    use chrono::Utc;

    use crate::inventory::domain::collate;

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct MockSnapshot {
        pub brands: Vec<Brand>,
        pub categories: Vec<Category>,
        pub items: Vec<ItemRecord>,
    }

    #[derive(Default)]
    struct MockState {
        data: MockSnapshot,
        failure: Option<String>,
    }

    #[derive(Default)]
    pub struct MockInventoryRepository {
        state: Mutex<MockState>,
    }

    impl MockInventoryRepository {
        /// Make every later call fail with a store error.
        pub fn fail_with(&self, message: &str) {
            if let Ok(mut s) = self.state.lock() {
                s.failure = Some(message.to_string());
            }
        }

        /// Copy of the stored records in insertion order.
        pub fn snapshot(&self) -> MockSnapshot {
            self.state.lock().map(|s| s.data.clone()).unwrap_or_default()
        }

        fn lock(&self) -> Result<MutexGuard<'_, MockState>, ServiceError> {
            let s = self.state.lock().map_err(|_| ServiceError::Db("mock store poisoned".into()))?;
            if let Some(msg) = &s.failure {
                return Err(ServiceError::Db(msg.clone()));
            }
            Ok(s)
        }
    }

    fn listing(data: &MockSnapshot, item: &ItemRecord) -> ItemListing {
        ItemListing {
            id: item.id,
            name: item.name.clone(),
            brand_id: item.brand_id,
            brand: data.brands.iter().find(|b| b.id == item.brand_id).cloned(),
            count: item.count,
            updated: item.updated,
        }
    }

    fn listings<'a>(data: &MockSnapshot, items: impl Iterator<Item = &'a ItemRecord>) -> Vec<ItemListing> {
        let mut out: Vec<ItemListing> = items.map(|i| listing(data, i)).collect();
        out.sort_by(|a, b| collate(&a.name, &b.name));
        out
    }

    fn sorted_categories(mut cats: Vec<Category>) -> Vec<Category> {
        cats.sort_by(|a, b| collate(&a.name, &b.name));
        cats
    }

    #[async_trait]
    impl InventoryRepository for MockInventoryRepository {
        async fn list_brands(&self) -> Result<Vec<Brand>, ServiceError> {
            let s = self.lock()?;
            let mut brands = s.data.brands.clone();
            brands.sort_by(|a, b| collate(&a.brand_name, &b.brand_name));
            Ok(brands)
        }

        async fn find_brand(&self, id: Uuid) -> Result<Option<Brand>, ServiceError> {
            Ok(self.lock()?.data.brands.iter().find(|b| b.id == id).cloned())
        }

        async fn find_brand_by_name(&self, brand_name: &str) -> Result<Option<Brand>, ServiceError> {
            Ok(self.lock()?.data.brands.iter().find(|b| b.brand_name == brand_name).cloned())
        }

        async fn insert_brand(&self, brand_name: &str) -> Result<Brand, ServiceError> {
            let mut s = self.lock()?;
            let brand = Brand { id: Uuid::new_v4(), brand_name: brand_name.to_string() };
            s.data.brands.push(brand.clone());
            Ok(brand)
        }

        async fn update_brand(&self, id: Uuid, brand_name: &str) -> Result<Option<Brand>, ServiceError> {
            let mut s = self.lock()?;
            Ok(s.data.brands.iter_mut().find(|b| b.id == id).map(|b| {
                b.brand_name = brand_name.to_string();
                b.clone()
            }))
        }

        async fn delete_brand(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut s = self.lock()?;
            let before = s.data.brands.len();
            s.data.brands.retain(|b| b.id != id);
            Ok(s.data.brands.len() < before)
        }

        async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
            Ok(sorted_categories(self.lock()?.data.categories.clone()))
        }

        async fn find_category(&self, id: Uuid) -> Result<Option<Category>, ServiceError> {
            Ok(self.lock()?.data.categories.iter().find(|c| c.id == id).cloned())
        }

        async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError> {
            Ok(self.lock()?.data.categories.iter().find(|c| c.name == name).cloned())
        }

        async fn categories_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, ServiceError> {
            let s = self.lock()?;
            let found = s.data.categories.iter().filter(|c| ids.contains(&c.id)).cloned().collect();
            Ok(sorted_categories(found))
        }

        async fn insert_category(&self, name: &str) -> Result<Category, ServiceError> {
            let mut s = self.lock()?;
            let category = Category { id: Uuid::new_v4(), name: name.to_string() };
            s.data.categories.push(category.clone());
            Ok(category)
        }

        async fn update_category(&self, id: Uuid, name: &str) -> Result<Option<Category>, ServiceError> {
            let mut s = self.lock()?;
            Ok(s.data.categories.iter_mut().find(|c| c.id == id).map(|c| {
                c.name = name.to_string();
                c.clone()
            }))
        }

        async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut s = self.lock()?;
            let before = s.data.categories.len();
            s.data.categories.retain(|c| c.id != id);
            Ok(s.data.categories.len() < before)
        }

        async fn list_items(&self) -> Result<Vec<ItemListing>, ServiceError> {
            let s = self.lock()?;
            Ok(listings(&s.data, s.data.items.iter()))
        }

        async fn items_by_brand(&self, brand_id: Uuid) -> Result<Vec<ItemListing>, ServiceError> {
            let s = self.lock()?;
            Ok(listings(&s.data, s.data.items.iter().filter(|i| i.brand_id == brand_id)))
        }

        async fn items_by_category(&self, category_id: Uuid) -> Result<Vec<ItemListing>, ServiceError> {
            let s = self.lock()?;
            Ok(listings(&s.data, s.data.items.iter().filter(|i| i.category_ids.contains(&category_id))))
        }

        async fn find_item(&self, id: Uuid) -> Result<Option<ItemDetail>, ServiceError> {
            let s = self.lock()?;
            let Some(item) = s.data.items.iter().find(|i| i.id == id) else { return Ok(None) };
            let categories = s.data.categories.iter().filter(|c| item.category_ids.contains(&c.id)).cloned().collect();
            Ok(Some(ItemDetail {
                id: item.id,
                name: item.name.clone(),
                brand_id: item.brand_id,
                brand: s.data.brands.iter().find(|b| b.id == item.brand_id).cloned(),
                categories: sorted_categories(categories),
                count: item.count,
                updated: item.updated,
            }))
        }

        async fn insert_item(&self, item: &NewItem) -> Result<ItemRecord, ServiceError> {
            let mut s = self.lock()?;
            let record = ItemRecord {
                id: Uuid::new_v4(),
                name: item.name.clone(),
                brand_id: item.brand_id,
                category_ids: item.category_ids.clone(),
                count: item.count,
                updated: Utc::now(),
            };
            s.data.items.push(record.clone());
            Ok(record)
        }

        async fn update_item(&self, id: Uuid, item: &NewItem) -> Result<Option<ItemRecord>, ServiceError> {
            let mut s = self.lock()?;
            Ok(s.data.items.iter_mut().find(|i| i.id == id).map(|r| {
                r.name = item.name.clone();
                r.brand_id = item.brand_id;
                r.category_ids = item.category_ids.clone();
                r.count = item.count;
                r.updated = Utc::now();
                r.clone()
            }))
        }

        async fn delete_item(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut s = self.lock()?;
            let before = s.data.items.len();
            s.data.items.retain(|i| i.id != id);
            Ok(s.data.items.len() < before)
        }
    }
}
