use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    Category, CategoryStats, EngineError, NewTransaction, NewUser, Repository, ResultEngine,
    Transaction, User,
};

mod categories;
mod statistics;
mod transactions;
mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}

#[async_trait]
impl Repository for Engine {
    async fn add_user(&self, user: NewUser) -> ResultEngine<bool> {
        self.new_user(user).await
    }

    async fn user_by_chat_id(&self, chat_id: i64) -> ResultEngine<Option<User>> {
        self.user(chat_id).await
    }

    async fn add_category(&self, chat_id: i64, name: &str) -> ResultEngine<Category> {
        self.new_category(chat_id, name).await
    }

    async fn rename_category(
        &self,
        chat_id: i64,
        category_id: i64,
        name: &str,
    ) -> ResultEngine<()> {
        self.update_category_name(chat_id, category_id, name).await
    }

    async fn delete_category(&self, chat_id: i64, category_id: i64) -> ResultEngine<()> {
        self.soft_delete_category(chat_id, category_id).await
    }

    async fn categories_by_chat_id(&self, chat_id: i64) -> ResultEngine<Vec<Category>> {
        self.live_categories(chat_id).await
    }

    async fn add_transaction(&self, transaction: NewTransaction) -> ResultEngine<Transaction> {
        self.new_transaction(transaction).await
    }

    async fn transaction_stats(
        &self,
        chat_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultEngine<CategoryStats> {
        self.stats_by_category(chat_id, start, end).await
    }
}
