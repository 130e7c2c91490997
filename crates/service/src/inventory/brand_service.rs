use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use super::domain::{Brand, BrandInput, ItemListing};
use super::repository::InventoryRepository;
use super::validation::required_display;
use super::view::{DeleteGuard, GuardTarget};

const BRAND_NAME_REQUIRED: &str = "Brand name is required.";

/// Brand operations, independent of the web framework.
pub struct BrandService<R: InventoryRepository> {
    repo: Arc<R>,
}

impl<R: InventoryRepository> BrandService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All brands, sorted by name.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Brand>, ServiceError> {
        self.repo.list_brands().await
    }

    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Brand, ServiceError> {
        self.repo.find_brand(id).await?.ok_or_else(|| ServiceError::not_found("brand"))
    }

    /// The brand and every item referencing it, fetched concurrently.
    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn get_with_dependents(&self, id: Uuid) -> Result<(Brand, Vec<ItemListing>), ServiceError> {
        let (brand, items) = tokio::try_join!(self.repo.find_brand(id), self.repo.items_by_brand(id))?;
        let brand = brand.ok_or_else(|| ServiceError::not_found("brand"))?;
        Ok((brand, items))
    }

    /// Create a brand unless one with the same trimmed name exists.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::inventory::{BrandService, BrandInput, mock::MockInventoryRepository};
    /// let svc = BrandService::new(Arc::new(MockInventoryRepository::default()));
    /// let first = tokio_test::block_on(svc.create_if_absent(BrandInput { brand_name: " Acme ".into() })).unwrap();
    /// let again = tokio_test::block_on(svc.create_if_absent(BrandInput { brand_name: "Acme".into() })).unwrap();
    /// assert_eq!(first.id, again.id);
    /// assert_eq!(again.brand_name, "Acme");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create_if_absent(&self, input: BrandInput) -> Result<Brand, ServiceError> {
        let name = required_display("brand_name", &input.brand_name, BRAND_NAME_REQUIRED)?;
        if let Some(existing) = self.repo.find_brand_by_name(&name).await? {
            debug!(brand_id = %existing.id, "brand exists");
            return Ok(existing);
        }
        let brand = self.repo.insert_brand(&name).await?;
        info!(brand_id = %brand.id, brand_name = %brand.brand_name, "brand_created");
        Ok(brand)
    }

    #[instrument(skip(self, input), fields(brand_id = %id))]
    pub async fn update(&self, id: Uuid, input: BrandInput) -> Result<Brand, ServiceError> {
        let name = required_display("brand_name", &input.brand_name, BRAND_NAME_REQUIRED)?;
        let brand = self.repo.update_brand(id, &name).await?.ok_or_else(|| ServiceError::not_found("brand"))?;
        info!(brand_id = %brand.id, "brand_updated");
        Ok(brand)
    }

    /// Delete confirmation view; `None` when the brand is gone.
    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn delete_view(&self, id: Uuid) -> Result<Option<DeleteGuard>, ServiceError> {
        let (brand, dependents) = tokio::try_join!(self.repo.find_brand(id), self.repo.items_by_brand(id))?;
        Ok(brand.map(|b| DeleteGuard { target: GuardTarget::Brand(b), dependents }))
    }

    /// Delete the brand only when no item references it.
    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let guard = self.delete_view(id).await?.ok_or_else(|| ServiceError::not_found("brand"))?;
        if guard.is_blocked() {
            warn!(dependents = guard.dependents.len(), "brand_delete_blocked");
            return Err(ServiceError::Conflict(Box::new(guard)));
        }
        if !self.repo.delete_brand(id).await? {
            return Err(ServiceError::not_found("brand"));
        }
        info!("brand_deleted");
        Ok(())
    }
}
