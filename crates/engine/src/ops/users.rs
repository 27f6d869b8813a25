use chrono::Utc;
use sea_orm::{prelude::*, sea_query::OnConflict};

use crate::{NewUser, ResultEngine, User, users};

use super::Engine;

impl Engine {
    /// Register a user, leaving an existing row untouched.
    pub async fn new_user(&self, user: NewUser) -> ResultEngine<bool> {
        let chat_id = user.chat_id;
        let inserted = users::Entity::insert(user.into_active(Utc::now()))
            .on_conflict(
                OnConflict::column(users::Column::ChatId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;

        if inserted == 0 {
            tracing::debug!(chat_id, "user already registered");
        }
        Ok(inserted > 0)
    }

    pub async fn user(&self, chat_id: i64) -> ResultEngine<Option<User>> {
        Ok(users::Entity::find_by_id(chat_id)
            .one(&self.database)
            .await?
            .map(User::from))
    }
}
