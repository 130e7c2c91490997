//! View assembly: selection reconciliation and the payloads handed back to
//! the presentation layer for forms and delete confirmations.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{Brand, Category, ItemDetail, ItemListing};

/// A category together with its checkbox state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChoice {
    #[serde(flatten)]
    pub category: Category,
    pub checked: bool,
}

/// The item as last submitted (or as stored, for edit forms), kept in raw
/// form so a re-render shows exactly what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub brand: String,
    pub count: String,
    pub category: Vec<String>,
}

impl From<&ItemDetail> for ItemDraft {
    fn from(d: &ItemDetail) -> Self {
        Self {
            id: Some(d.id),
            name: d.name.clone(),
            brand: d.brand_id.to_string(),
            count: d.count.to_string(),
            category: d.categories.iter().map(|c| c.id.to_string()).collect(),
        }
    }
}

/// Everything an item form needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFormState {
    pub item: Option<ItemDraft>,
    pub brands: Vec<Brand>,
    pub categories: Vec<CategoryChoice>,
}

impl ItemFormState {
    pub fn assemble(item: Option<ItemDraft>, brands: Vec<Brand>, categories: Vec<Category>, selected: &[Uuid]) -> Self {
        Self { item, brands, categories: reconcile_selections(categories, selected) }
    }
}

/// Entity a delete guard refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardTarget {
    Brand(Brand),
    Category(Category),
}

impl GuardTarget {
    pub fn id(&self) -> Uuid {
        match self {
            GuardTarget::Brand(b) => b.id,
            GuardTarget::Category(c) => c.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GuardTarget::Brand(b) => &b.brand_name,
            GuardTarget::Category(c) => &c.name,
        }
    }
}

/// Delete confirmation payload: the target and the items still referencing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteGuard {
    pub target: GuardTarget,
    pub dependents: Vec<ItemListing>,
}

impl DeleteGuard {
    pub fn is_blocked(&self) -> bool { !self.dependents.is_empty() }
}

impl fmt::Display for DeleteGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is referenced by {} item(s)", self.target.label(), self.dependents.len())
    }
}

/// Mark each category checked iff its id is in `selected`, keeping list order.
pub fn reconcile_selections(all_categories: Vec<Category>, selected: &[Uuid]) -> Vec<CategoryChoice> {
    let selected: HashSet<&Uuid> = selected.iter().collect();
    all_categories
        .into_iter()
        .map(|category| {
            let checked = selected.contains(&category.id);
            CategoryChoice { category, checked }
        })
        .collect()
}
