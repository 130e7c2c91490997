use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use sea_orm::sea_query::{Expr, Func, Order, SimpleExpr};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, item, item_category};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ItemCategory }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::ItemCategory => Entity::has_many(item_category::Entity).into() }
    }
}

impl Related<item_category::Entity> for Entity {
    fn to() -> RelationDef { Relation::ItemCategory.def() }
}

impl Related<item::Entity> for Entity {
    fn to() -> RelationDef { item_category::Relation::Item.def() }
    fn via() -> Option<RelationDef> { Some(item_category::Relation::Category.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("Category name is required.".into())); }
    Ok(())
}

/// Order by name, case-insensitive, raw value as tie-breaker.
pub fn sorted(select: Select<Entity>) -> Select<Entity> {
    select
        .order_by(SimpleExpr::from(Func::lower(Expr::col((Entity, Column::Name)))), Order::Asc)
        .order_by_asc(Column::Name)
}

pub fn find_sorted() -> Select<Entity> { sorted(Entity::find()) }

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}

pub async fn find_many<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> Result<Vec<Model>, errors::ModelError> {
    if ids.is_empty() { return Ok(Vec::new()); }
    Ok(find_sorted().filter(Column::Id.is_in(ids.iter().copied())).all(db).await?)
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite the category name; `None` when no category has this id.
pub async fn rename<C: ConnectionTrait>(db: &C, id: Uuid, name: &str) -> Result<Option<Model>, errors::ModelError> {
    validate_name(name)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    am.name = Set(name.to_string());
    Ok(Some(am.update(db).await?))
}
