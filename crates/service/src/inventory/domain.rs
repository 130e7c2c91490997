use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Brand (business view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: Uuid,
    pub brand_name: String,
}

impl Brand {
    pub fn url(&self) -> String { format!("/inventory/brand/{}", self.id) }
}

/// Category (business view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn url(&self) -> String { format!("/inventory/category/{}", self.id) }
}

/// Stored item with its references as ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub category_ids: Vec<Uuid>,
    pub count: i32,
    pub updated: DateTime<Utc>,
}

impl ItemRecord {
    pub fn url(&self) -> String { item_url(self.id) }
}

/// Item row for list views, brand populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemListing {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub brand: Option<Brand>,
    pub count: i32,
    pub updated: DateTime<Utc>,
}

impl ItemListing {
    pub fn url(&self) -> String { item_url(self.id) }
}

/// Item with brand and categories populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub brand: Option<Brand>,
    pub categories: Vec<Category>,
    pub count: i32,
    pub updated: DateTime<Utc>,
}

impl ItemDetail {
    pub fn url(&self) -> String { item_url(self.id) }

    /// Medium date, e.g. `Oct 14, 2026`.
    pub fn updated_formatted(&self) -> String { self.updated.format("%b %-d, %Y").to_string() }

    pub fn category_ids(&self) -> Vec<Uuid> { self.categories.iter().map(|c| c.id).collect() }
}

/// Validated item values, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub brand_id: Uuid,
    pub count: i32,
    pub category_ids: Vec<Uuid>,
}

/// Submitted category field: absent, a single checkbox value, or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryField {
    One(String),
    Many(Vec<String>),
}

/// Submitted count: a JSON integer, text from a form field, or anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountField {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

/// Raw item form as submitted by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub count: Option<CountField>,
    #[serde(default)]
    pub category: Option<CategoryField>,
}

/// Display input for brand and category forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandInput {
    #[serde(default)]
    pub brand_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
}

fn item_url(id: Uuid) -> String { format!("/inventory/item/{}", id) }

/// Case-insensitive ordering for display fields; raw value breaks ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

impl From<models::brand::Model> for Brand {
    fn from(m: models::brand::Model) -> Self { Self { id: m.id, brand_name: m.brand_name } }
}

impl From<models::category::Model> for Category {
    fn from(m: models::category::Model) -> Self { Self { id: m.id, name: m.name } }
}

impl From<(models::item::Model, Option<models::brand::Model>)> for ItemListing {
    fn from((item, brand): (models::item::Model, Option<models::brand::Model>)) -> Self {
        Self {
            id: item.id,
            name: item.name,
            brand_id: item.brand_id,
            brand: brand.map(Brand::from),
            count: item.count,
            updated: item.updated.with_timezone(&Utc),
        }
    }
}

impl ItemRecord {
    pub(crate) fn from_model(item: models::item::Model, category_ids: Vec<Uuid>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            brand_id: item.brand_id,
            category_ids,
            count: item.count,
            updated: item.updated.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collate_ignores_case_then_orders_raw() {
        let mut names = vec!["banana", "Apple", "apple", "Cherry"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(names, vec!["Apple", "apple", "banana", "Cherry"]);
    }

    #[test]
    fn category_field_accepts_single_or_list() {
        let one: ItemForm = serde_json::from_str(r#"{"name":"w","brand":"b","category":"x"}"#).unwrap();
        assert_eq!(one.category, Some(CategoryField::One("x".into())));
        let many: ItemForm = serde_json::from_str(r#"{"category":["x","y"]}"#).unwrap();
        assert_eq!(many.category, Some(CategoryField::Many(vec!["x".into(), "y".into()])));
        let none: ItemForm = serde_json::from_str(r#"{"name":"w"}"#).unwrap();
        assert_eq!(none.category, None);
    }

    #[test]
    fn count_field_variants() {
        let f: ItemForm = serde_json::from_str(r#"{"count":5}"#).unwrap();
        assert_eq!(f.count, Some(CountField::Integer(5)));
        let f: ItemForm = serde_json::from_str(r#"{"count":"7"}"#).unwrap();
        assert_eq!(f.count, Some(CountField::Text("7".into())));
        let f: ItemForm = serde_json::from_str(r#"{"count":1.5}"#).unwrap();
        assert!(matches!(f.count, Some(CountField::Other(_))));
    }

    #[test]
    fn updated_formatted_is_medium_date() {
        let updated = DateTime::parse_from_rfc3339("2026-10-04T12:00:00Z").unwrap().with_timezone(&Utc);
        let d = ItemDetail {
            id: Uuid::nil(),
            name: "w".into(),
            brand_id: Uuid::nil(),
            brand: None,
            categories: vec![],
            count: 0,
            updated,
        };
        assert_eq!(d.updated_formatted(), "Oct 4, 2026");
        assert_eq!(d.url(), format!("/inventory/item/{}", Uuid::nil()));
    }
}
