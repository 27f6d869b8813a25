//! Category registry per chat.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// A live or soft-deleted category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub chat_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub chat_id: i64,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            chat_id: model.chat_id,
            name: model.name,
            created_at: model.created_at,
            is_deleted: model.is_deleted,
        }
    }
}
