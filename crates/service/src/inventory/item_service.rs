use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::{FieldError, ServiceError};
use super::domain::{ItemDetail, ItemForm, ItemListing, ItemRecord, NewItem};
use super::repository::InventoryRepository;
use super::validation::ItemSubmission;
use super::view::{ItemDraft, ItemFormState};

/// Item operations. Brand and category references are checked against the
/// store before anything is written.
pub struct ItemService<R: InventoryRepository> {
    repo: Arc<R>,
}

impl<R: InventoryRepository> ItemService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ItemListing>, ServiceError> {
        self.repo.list_items().await
    }

    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<ItemDetail, ServiceError> {
        self.repo.find_item(id).await?.ok_or_else(|| ServiceError::not_found("item"))
    }

    /// Validate the form and persist a new item.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::inventory::{BrandService, BrandInput, ItemService, ItemForm, CountField, mock::MockInventoryRepository};
    /// let repo = Arc::new(MockInventoryRepository::default());
    /// let brands = BrandService::new(repo.clone());
    /// let items = ItemService::new(repo);
    /// let acme = tokio_test::block_on(brands.create_if_absent(BrandInput { brand_name: "Acme".into() })).unwrap();
    /// let form = ItemForm { name: "Widget".into(), brand: acme.id.to_string(), count: Some(CountField::Text("3".into())), category: None };
    /// let item = tokio_test::block_on(items.create(form)).unwrap();
    /// assert_eq!(item.count, 3);
    /// assert!(item.category_ids.is_empty());
    /// ```
    #[instrument(skip(self, form))]
    pub async fn create(&self, form: ItemForm) -> Result<ItemRecord, ServiceError> {
        let item = self.validated(None, form).await?;
        let created = self.repo.insert_item(&item).await?;
        info!(item_id = %created.id, brand_id = %created.brand_id, categories = created.category_ids.len(), "item_created");
        Ok(created)
    }

    /// Full replace of an existing item.
    #[instrument(skip(self, form), fields(item_id = %id))]
    pub async fn update(&self, id: Uuid, form: ItemForm) -> Result<ItemRecord, ServiceError> {
        let item = self.validated(Some(id), form).await?;
        let updated = self.repo.update_item(id, &item).await?.ok_or_else(|| ServiceError::not_found("item"))?;
        info!(item_id = %updated.id, "item_updated");
        Ok(updated)
    }

    /// Remove the item; `false` when nothing was stored under `id`.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let removed = self.repo.delete_item(id).await?;
        if removed {
            info!("item_deleted");
        } else {
            debug!("item already absent");
        }
        Ok(removed)
    }

    /// Blank form: every brand, every category unchecked.
    #[instrument(skip(self))]
    pub async fn create_view(&self) -> Result<ItemFormState, ServiceError> {
        let (brands, categories) = tokio::try_join!(self.repo.list_brands(), self.repo.list_categories())?;
        Ok(ItemFormState::assemble(None, brands, categories, &[]))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn edit_view(&self, id: Uuid) -> Result<ItemFormState, ServiceError> {
        let (item, brands, categories) =
            tokio::try_join!(self.repo.find_item(id), self.repo.list_brands(), self.repo.list_categories())?;
        let item = item.ok_or_else(|| ServiceError::not_found("item"))?;
        let selected = item.category_ids();
        Ok(ItemFormState::assemble(Some(ItemDraft::from(&item)), brands, categories, &selected))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete_view(&self, id: Uuid) -> Result<Option<ItemDetail>, ServiceError> {
        self.repo.find_item(id).await
    }

    async fn validated(&self, id: Option<Uuid>, form: ItemForm) -> Result<NewItem, ServiceError> {
        let mut sub = ItemSubmission::parse(id, form);

        let requested = sub.brand_id;
        let brand_lookup = async {
            match requested {
                Some(brand_id) => self.repo.find_brand(brand_id).await,
                None => Ok(None),
            }
        };
        let (brand, found) = tokio::try_join!(brand_lookup, self.repo.categories_by_ids(&sub.category_ids))?;
        if sub.brand_id.is_some() && brand.is_none() {
            sub.errors.push(FieldError::new("brand", "Brand does not exist."));
        }
        if found.len() < sub.category_ids.len() {
            sub.errors.push(FieldError::new("category", "Selected category does not exist."));
        }

        match (sub.brand_id, sub.count) {
            (Some(brand_id), Some(count)) if sub.errors.is_empty() => Ok(NewItem {
                name: sub.draft.name.clone(),
                brand_id,
                count,
                category_ids: sub.category_ids,
            }),
            _ => Err(self.reject(sub).await),
        }
    }

    /// Build the validation error carrying a re-renderable form.
    async fn reject(&self, sub: ItemSubmission) -> ServiceError {
        warn!(fields = ?sub.errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(), "item_form_rejected");
        match tokio::try_join!(self.repo.list_brands(), self.repo.list_categories()) {
            Ok((brands, categories)) => {
                let form = ItemFormState::assemble(Some(sub.draft), brands, categories, &sub.category_ids);
                ServiceError::validation(sub.errors, Some(form))
            }
            Err(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::{Brand, CategoryField, CountField, Category};
    use crate::inventory::repository::mock::MockInventoryRepository;

    struct Fixture {
        repo: Arc<MockInventoryRepository>,
        svc: ItemService<MockInventoryRepository>,
        acme: Brand,
        tools: Category,
        garden: Category,
    }

    async fn fixture() -> anyhow::Result<Fixture> {
        let repo = Arc::new(MockInventoryRepository::default());
        let acme = repo.insert_brand("Acme").await?;
        let tools = repo.insert_category("Tools").await?;
        let garden = repo.insert_category("garden").await?;
        Ok(Fixture { svc: ItemService::new(repo.clone()), repo, acme, tools, garden })
    }

    fn form(name: &str, brand: &Brand, count: CountField, category: Option<CategoryField>) -> ItemForm {
        ItemForm { name: name.into(), brand: brand.id.to_string(), count: Some(count), category }
    }

    fn failure(err: ServiceError) -> Box<crate::errors::ValidationFailure> {
        match err {
            ServiceError::Validation(f) => f,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_normalizes_single_category() -> anyhow::Result<()> {
        let f = fixture().await?;
        let created = f
            .svc
            .create(form("Rake", &f.acme, CountField::Integer(4), Some(CategoryField::One(f.garden.id.to_string()))))
            .await?;
        assert_eq!(created.category_ids, vec![f.garden.id]);

        let detail = f.svc.get(created.id).await?;
        assert_eq!(detail.brand, Some(f.acme.clone()));
        assert_eq!(detail.categories, vec![f.garden.clone()]);
        Ok(())
    }

    #[tokio::test]
    async fn create_dedupes_category_list() -> anyhow::Result<()> {
        let f = fixture().await?;
        let (t, g) = (f.tools.id.to_string(), f.garden.id.to_string());
        let created = f
            .svc
            .create(form("Rake", &f.acme, CountField::Integer(1), Some(CategoryField::Many(vec![t.clone(), g, t]))))
            .await?;
        assert_eq!(created.category_ids, vec![f.tools.id, f.garden.id]);
        Ok(())
    }

    #[tokio::test]
    async fn negative_count_returns_form_with_selection() -> anyhow::Result<()> {
        let f = fixture().await?;
        let err = f
            .svc
            .create(form("Rake", &f.acme, CountField::Integer(-1), Some(CategoryField::One(f.tools.id.to_string()))))
            .await
            .unwrap_err();
        let fail = failure(err);
        assert_eq!(fail.errors.len(), 1);
        assert_eq!(fail.errors[0].field, "count");

        let state = fail.form.expect("form state attached");
        assert_eq!(state.item.as_ref().map(|d| d.count.as_str()), Some("-1"));
        assert_eq!(state.brands, vec![f.acme.clone()]);
        let checks: Vec<(String, bool)> = state.categories.iter().map(|c| (c.category.name.clone(), c.checked)).collect();
        assert_eq!(checks, vec![("garden".to_string(), false), ("Tools".to_string(), true)]);
        assert!(f.repo.snapshot().items.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_brand_and_category_are_rejected() -> anyhow::Result<()> {
        let f = fixture().await?;
        let ghost = Brand { id: Uuid::new_v4(), brand_name: "Ghost".into() };
        let err = f
            .svc
            .create(form("Rake", &ghost, CountField::Integer(1), Some(CategoryField::One(Uuid::new_v4().to_string()))))
            .await
            .unwrap_err();
        let fields: Vec<String> = failure(err).errors.into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["brand", "category"]);
        assert!(f.repo.snapshot().items.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_everything() -> anyhow::Result<()> {
        let f = fixture().await?;
        let created = f
            .svc
            .create(form("Rake", &f.acme, CountField::Integer(1), Some(CategoryField::One(f.tools.id.to_string()))))
            .await?;
        let updated = f
            .svc
            .update(created.id, form("Big Rake", &f.acme, CountField::Text("9".into()), Some(CategoryField::One(f.garden.id.to_string()))))
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Big Rake");
        assert_eq!(updated.count, 9);
        assert_eq!(updated.category_ids, vec![f.garden.id]);
        assert!(updated.updated >= created.updated);

        let invalid = f.svc.update(created.id, form("", &f.acme, CountField::Integer(1), None)).await.unwrap_err();
        let fail = failure(invalid);
        assert_eq!(fail.errors[0].field, "name");
        let state = fail.form.expect("form state attached");
        assert_eq!(state.item.as_ref().and_then(|d| d.id), Some(created.id));
        assert_eq!(state.brands, f.repo.list_brands().await?);
        let listed: Vec<Category> = state.categories.iter().map(|c| c.category.clone()).collect();
        assert_eq!(listed, f.repo.list_categories().await?);
        assert!(state.categories.iter().all(|c| !c.checked));
        assert_eq!(f.svc.get(created.id).await?.name, "Big Rake");

        let missing = f.svc.update(Uuid::new_v4(), form("x", &f.acme, CountField::Integer(1), None)).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_unguarded_and_permissive() -> anyhow::Result<()> {
        let f = fixture().await?;
        let created = f.svc.create(form("Rake", &f.acme, CountField::Integer(1), None)).await?;
        assert!(f.svc.delete(created.id).await?);
        assert!(!f.svc.delete(created.id).await?);
        assert!(f.svc.delete_view(created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn views_list_choices() -> anyhow::Result<()> {
        let f = fixture().await?;
        let blank = f.svc.create_view().await?;
        assert!(blank.item.is_none());
        assert!(blank.categories.iter().all(|c| !c.checked));

        let created = f
            .svc
            .create(form("Rake", &f.acme, CountField::Integer(1), Some(CategoryField::One(f.tools.id.to_string()))))
            .await?;
        let edit = f.svc.edit_view(created.id).await?;
        assert_eq!(edit.item.as_ref().and_then(|d| d.id), Some(created.id));
        let checked: Vec<Uuid> = edit.categories.iter().filter(|c| c.checked).map(|c| c.category.id).collect();
        assert_eq!(checked, vec![f.tools.id]);

        assert!(matches!(f.svc.edit_view(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_is_sorted_with_brand() -> anyhow::Result<()> {
        let f = fixture().await?;
        for name in ["saw", "Axe", "hammer"] {
            f.svc.create(form(name, &f.acme, CountField::Integer(1), None)).await?;
        }
        let listed = f.svc.list().await?;
        let names: Vec<&str> = listed.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Axe", "hammer", "saw"]);
        assert!(listed.iter().all(|i| i.brand.as_ref() == Some(&f.acme)));
        Ok(())
    }
}
