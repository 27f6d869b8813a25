//! Storage port used by the bot.
//!
//! [`Engine`](crate::Engine) is the SQLite implementation; tests may plug in
//! their own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{Category, CategoryStats, NewTransaction, NewUser, ResultEngine, Transaction, User};

#[async_trait]
pub trait Repository: Send + Sync {
    /// Insert the user unless one already exists for the chat.
    ///
    /// Returns `true` when a row was created.
    async fn add_user(&self, user: NewUser) -> ResultEngine<bool>;

    async fn user_by_chat_id(&self, chat_id: i64) -> ResultEngine<Option<User>>;

    async fn add_category(&self, chat_id: i64, name: &str) -> ResultEngine<Category>;

    async fn rename_category(&self, chat_id: i64, category_id: i64, name: &str)
    -> ResultEngine<()>;

    /// Soft delete the category and every transaction referencing it.
    async fn delete_category(&self, chat_id: i64, category_id: i64) -> ResultEngine<()>;

    /// Live categories of the chat, oldest first.
    async fn categories_by_chat_id(&self, chat_id: i64) -> ResultEngine<Vec<Category>>;

    async fn add_transaction(&self, transaction: NewTransaction) -> ResultEngine<Transaction>;

    /// Aggregate live transactions created in `[start, end)`.
    async fn transaction_stats(
        &self,
        chat_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultEngine<CategoryStats>;
}
