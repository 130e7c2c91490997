use std::sync::Arc;

use service::inventory::{BrandService, CategoryService, InventoryRepository, ItemService};

use crate::metrics::InventoryMetrics;

/// Shared handler state: one service per entity over a single store.
pub struct AppState<R: InventoryRepository> {
    pub brands: Arc<BrandService<R>>,
    pub categories: Arc<CategoryService<R>>,
    pub items: Arc<ItemService<R>>,
    pub metrics: Arc<InventoryMetrics>,
}

impl<R: InventoryRepository> AppState<R> {
    pub fn new(repo: Arc<R>, metrics: Arc<InventoryMetrics>) -> Self {
        Self {
            brands: Arc::new(BrandService::new(repo.clone())),
            categories: Arc::new(CategoryService::new(repo.clone())),
            items: Arc::new(ItemService::new(repo)),
            metrics,
        }
    }
}

// derive(Clone) would require R: Clone
impl<R: InventoryRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            brands: self.brands.clone(),
            categories: self.categories.clone(),
            items: self.items.clone(),
            metrics: self.metrics.clone(),
        }
    }
}
