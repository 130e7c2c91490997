use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{category, errors, item};

/// One membership of an item in a category.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Item, Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Item => Entity::belongs_to(item::Entity).from(Column::ItemId).to(item::Column::Id).into(),
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
        }
    }
}

impl Related<item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Item.def() }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Replace the category set of an item.
pub async fn replace_for_item<C: ConnectionTrait>(db: &C, item_id: Uuid, category_ids: &[Uuid]) -> Result<(), errors::ModelError> {
    Entity::delete_many().filter(Column::ItemId.eq(item_id)).exec(db).await?;
    if category_ids.is_empty() { return Ok(()); }
    let rows = category_ids.iter().map(|&category_id| ActiveModel {
        item_id: Set(item_id),
        category_id: Set(category_id),
    });
    Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

pub async fn category_ids_for_item<C: ConnectionTrait>(db: &C, item_id: Uuid) -> Result<Vec<Uuid>, errors::ModelError> {
    let rows = Entity::find().filter(Column::ItemId.eq(item_id)).all(db).await?;
    Ok(rows.into_iter().map(|r| r.category_id).collect())
}
