use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use super::domain::{Category, CategoryInput, ItemListing};
use super::repository::InventoryRepository;
use super::validation::required_display;
use super::view::{DeleteGuard, GuardTarget};

const CATEGORY_NAME_REQUIRED: &str = "Category name is required.";

pub struct CategoryService<R: InventoryRepository> {
    repo: Arc<R>,
}

impl<R: InventoryRepository> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>, ServiceError> {
        self.repo.list_categories().await
    }

    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Category, ServiceError> {
        self.repo.find_category(id).await?.ok_or_else(|| ServiceError::not_found("category"))
    }

    /// The category and the items tagged with it.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get_with_dependents(&self, id: Uuid) -> Result<(Category, Vec<ItemListing>), ServiceError> {
        let (category, items) = tokio::try_join!(self.repo.find_category(id), self.repo.items_by_category(id))?;
        let category = category.ok_or_else(|| ServiceError::not_found("category"))?;
        Ok((category, items))
    }

    /// Create a category unless the trimmed name is already taken; returns
    /// the stored record either way.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::inventory::{CategoryService, CategoryInput, mock::MockInventoryRepository};
    /// let svc = CategoryService::new(Arc::new(MockInventoryRepository::default()));
    /// let tools = tokio_test::block_on(svc.create_if_absent(CategoryInput { name: "Tools".into() })).unwrap();
    /// assert_eq!(tools.url(), format!("/inventory/category/{}", tools.id));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create_if_absent(&self, input: CategoryInput) -> Result<Category, ServiceError> {
        let name = required_display("name", &input.name, CATEGORY_NAME_REQUIRED)?;
        if let Some(existing) = self.repo.find_category_by_name(&name).await? {
            debug!(category_id = %existing.id, "category exists");
            return Ok(existing);
        }
        let category = self.repo.insert_category(&name).await?;
        info!(category_id = %category.id, name = %category.name, "category_created");
        Ok(category)
    }

    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update(&self, id: Uuid, input: CategoryInput) -> Result<Category, ServiceError> {
        let name = required_display("name", &input.name, CATEGORY_NAME_REQUIRED)?;
        let category = self.repo.update_category(id, &name).await?.ok_or_else(|| ServiceError::not_found("category"))?;
        info!(category_id = %category.id, "category_updated");
        Ok(category)
    }

    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_view(&self, id: Uuid) -> Result<Option<DeleteGuard>, ServiceError> {
        let (category, dependents) = tokio::try_join!(self.repo.find_category(id), self.repo.items_by_category(id))?;
        Ok(category.map(|c| DeleteGuard { target: GuardTarget::Category(c), dependents }))
    }

    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let guard = self.delete_view(id).await?.ok_or_else(|| ServiceError::not_found("category"))?;
        if guard.is_blocked() {
            warn!(dependents = guard.dependents.len(), "category_delete_blocked");
            return Err(ServiceError::Conflict(Box::new(guard)));
        }
        if !self.repo.delete_category(id).await? {
            return Err(ServiceError::not_found("category"));
        }
        info!("category_deleted");
        Ok(())
    }
}
