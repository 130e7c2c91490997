use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use sea_orm::sea_query::{Expr, Func, Order, SimpleExpr};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, item};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brand")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub brand_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Item }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Item => Entity::has_many(item::Entity).into() }
    }
}

impl Related<item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Item.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_brand_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("Brand name is required.".into())); }
    Ok(())
}

/// Order by brand name, case-insensitive, raw value as tie-breaker.
pub fn sorted(select: Select<Entity>) -> Select<Entity> {
    select
        .order_by(SimpleExpr::from(Func::lower(Expr::col((Entity, Column::BrandName)))), Order::Asc)
        .order_by_asc(Column::BrandName)
}

pub fn find_sorted() -> Select<Entity> { sorted(Entity::find()) }

pub async fn find_by_name<C: ConnectionTrait>(db: &C, brand_name: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::BrandName.eq(brand_name)).one(db).await?)
}

pub async fn create<C: ConnectionTrait>(db: &C, brand_name: &str) -> Result<Model, errors::ModelError> {
    validate_brand_name(brand_name)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        brand_name: Set(brand_name.to_string()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite the brand name; `None` when no brand has this id.
pub async fn rename<C: ConnectionTrait>(db: &C, id: Uuid, brand_name: &str) -> Result<Option<Model>, errors::ModelError> {
    validate_brand_name(brand_name)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    am.brand_name = Set(brand_name.to_string());
    Ok(Some(am.update(db).await?))
}
