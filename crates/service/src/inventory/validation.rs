//! Form normalization and field validation.
//!
//! Store-dependent checks (does the brand exist?) live in the item service;
//! everything here is pure.

use uuid::Uuid;

use crate::errors::{FieldError, ServiceError};
use super::domain::{CategoryField, CountField, ItemForm};
use super::view::ItemDraft;

/// Trim a display field and reject it when empty.
pub fn required_display(field: &str, value: &str, message: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::invalid(field, message));
    }
    Ok(trimmed.to_string())
}

/// Normalize the category checkbox field into a set of raw ids.
///
/// Absent becomes empty, a single value becomes a one-element set; blanks are
/// dropped and duplicates collapse onto their first appearance.
pub fn normalize_categories(field: Option<CategoryField>) -> Vec<String> {
    let raw = match field {
        None => Vec::new(),
        Some(CategoryField::One(v)) => vec![v],
        Some(CategoryField::Many(vs)) => vs,
    };
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for v in raw {
        let v = v.trim().to_string();
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn count_text(count: &Option<CountField>) -> String {
    match count {
        None => String::new(),
        Some(CountField::Integer(n)) => n.to_string(),
        Some(CountField::Text(s)) => s.trim().to_string(),
        Some(CountField::Other(v)) => v.to_string(),
    }
}

fn parse_count(count: &Option<CountField>) -> Result<i32, FieldError> {
    let n = match count {
        None => return Err(FieldError::new("count", "Must be a positive integer.")),
        Some(CountField::Text(s)) if s.trim().is_empty() => return Err(FieldError::new("count", "Must be a positive integer.")),
        Some(CountField::Integer(n)) => *n,
        Some(CountField::Text(s)) => s.trim().parse::<i64>().map_err(|_| FieldError::new("count", "Must be a positive integer."))?,
        Some(CountField::Other(_)) => return Err(FieldError::new("count", "Must be a positive integer.")),
    };
    if n < 0 {
        return Err(FieldError::new("count", "Must be a positive integer."));
    }
    i32::try_from(n).map_err(|_| FieldError::new("count", "Count is too large."))
}

/// A parsed item form: the raw draft for re-rendering, the values that
/// parsed, and the field errors found so far.
#[derive(Debug, Clone)]
pub struct ItemSubmission {
    pub draft: ItemDraft,
    pub brand_id: Option<Uuid>,
    pub count: Option<i32>,
    pub category_ids: Vec<Uuid>,
    pub errors: Vec<FieldError>,
}

impl ItemSubmission {
    pub fn parse(id: Option<Uuid>, form: ItemForm) -> Self {
        // categories first: per-id checks below run on the normalized set
        let category = normalize_categories(form.category);
        let mut errors = Vec::new();

        let name = form.name.trim().to_string();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name must not be empty."));
        }

        let brand = form.brand.trim().to_string();
        let brand_id = if brand.is_empty() {
            errors.push(FieldError::new("brand", "Brand must not be empty."));
            None
        } else {
            match Uuid::parse_str(&brand) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FieldError::new("brand", "Brand must be a valid id."));
                    None
                }
            }
        };

        let count = match parse_count(&form.count) {
            Ok(n) => Some(n),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let mut category_ids = Vec::with_capacity(category.len());
        let mut malformed = false;
        for raw in &category {
            match Uuid::parse_str(raw) {
                Ok(id) => category_ids.push(id),
                Err(_) => malformed = true,
            }
        }
        if malformed {
            errors.push(FieldError::new("category", "Category must be a valid id."));
        }

        let draft = ItemDraft { id, name, brand, count: count_text(&form.count), category };
        Self { draft, brand_id, count, category_ids, errors }
    }
}
