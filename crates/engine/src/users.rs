//! Users table.
//!
//! A user is identified by the chat it talks from. The row is written once on
//! the first `/start` and never touched again.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub chat_id: i64,
    pub username: Option<String>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to register a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewUser {
    pub chat_id: i64,
    pub username: Option<String>,
    pub language: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub chat_id: i64,
    pub username: Option<String>,
    pub language: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            chat_id: model.chat_id,
            username: model.username,
            language: model.language,
            created_at: model.created_at,
        }
    }
}

impl NewUser {
    pub(crate) fn into_active(self, created_at: DateTime<Utc>) -> ActiveModel {
        ActiveModel {
            chat_id: ActiveValue::Set(self.chat_id),
            username: ActiveValue::Set(self.username),
            language: ActiveValue::Set(self.language),
            created_at: ActiveValue::Set(created_at),
        }
    }
}
