use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use sea_orm::sea_query::{Expr, Func, Order, SimpleExpr};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{brand, category, errors, item_category};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub count: i32,
    pub updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Brand, ItemCategory }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Brand => Entity::belongs_to(brand::Entity).from(Column::BrandId).to(brand::Column::Id).into(),
            Relation::ItemCategory => Entity::has_many(item_category::Entity).into(),
        }
    }
}

impl Related<brand::Entity> for Entity {
    fn to() -> RelationDef { Relation::Brand.def() }
}

impl Related<item_category::Entity> for Entity {
    fn to() -> RelationDef { Relation::ItemCategory.def() }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { item_category::Relation::Category.def() }
    fn via() -> Option<RelationDef> { Some(item_category::Relation::Item.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for an insert or a full replace.
#[derive(Clone, Debug)]
pub struct ItemFields<'a> {
    pub name: &'a str,
    pub brand_id: Uuid,
    pub count: i32,
    pub category_ids: &'a [Uuid],
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("Name must not be empty.".into())); }
    Ok(())
}

pub fn validate_count(count: i32) -> Result<(), errors::ModelError> {
    if count < 0 { return Err(errors::ModelError::Validation("Count cannot be negative!".into())); }
    Ok(())
}

/// Order by item name, case-insensitive, raw value as tie-breaker.
pub fn sorted(select: Select<Entity>) -> Select<Entity> {
    select
        .order_by(SimpleExpr::from(Func::lower(Expr::col((Entity, Column::Name)))), Order::Asc)
        .order_by_asc(Column::Name)
}

pub fn find_sorted() -> Select<Entity> { sorted(Entity::find()) }

/// Items carrying `category_id` in their category set.
pub fn in_category(category_id: Uuid) -> Select<Entity> {
    find_sorted()
        .inner_join(item_category::Entity)
        .filter(item_category::Column::CategoryId.eq(category_id))
}

/// Insert the item row and its category memberships. Run inside a transaction.
pub async fn create<C: ConnectionTrait>(db: &C, fields: &ItemFields<'_>) -> Result<Model, errors::ModelError> {
    validate_name(fields.name)?;
    validate_count(fields.count)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(fields.name.to_string()),
        brand_id: Set(fields.brand_id),
        count: Set(fields.count),
        updated: Set(Utc::now().into()),
    };
    let created = am.insert(db).await?;
    item_category::replace_for_item(db, created.id, fields.category_ids).await?;
    Ok(created)
}

/// Overwrite every field of an existing item; `None` when the id is unknown.
pub async fn replace<C: ConnectionTrait>(db: &C, id: Uuid, fields: &ItemFields<'_>) -> Result<Option<Model>, errors::ModelError> {
    validate_name(fields.name)?;
    validate_count(fields.count)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    am.name = Set(fields.name.to_string());
    am.brand_id = Set(fields.brand_id);
    am.count = Set(fields.count);
    am.updated = Set(Utc::now().into());
    let updated = am.update(db).await?;
    item_category::replace_for_item(db, id, fields.category_ids).await?;
    Ok(Some(updated))
}
