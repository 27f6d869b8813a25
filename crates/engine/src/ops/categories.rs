use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{Category, EngineError, ResultEngine, categories, transactions};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    pub async fn new_category(&self, chat_id: i64, name: &str) -> ResultEngine<Category> {
        let name = normalize_required_name(name, "category")?;
        let active = categories::ActiveModel {
            id: ActiveValue::NotSet,
            chat_id: ActiveValue::Set(chat_id),
            name: ActiveValue::Set(name),
            created_at: ActiveValue::Set(Utc::now()),
            is_deleted: ActiveValue::Set(false),
        };
        let model = active.insert(&self.database).await?;
        Ok(model.into())
    }

    /// Replace the name of a live category owned by the chat.
    pub async fn update_category_name(
        &self,
        chat_id: i64,
        category_id: i64,
        name: &str,
    ) -> ResultEngine<()> {
        let name = normalize_required_name(name, "category")?;
        let result = categories::Entity::update_many()
            .col_expr(categories::Column::Name, Expr::value(name))
            .filter(categories::Column::Id.eq(category_id))
            .filter(categories::Column::ChatId.eq(chat_id))
            .filter(categories::Column::IsDeleted.eq(false))
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(category_not_found(category_id));
        }
        Ok(())
    }

    /// Mark the category and all of its transactions as deleted.
    ///
    /// Both updates share one DB transaction: either everything is hidden or
    /// nothing changes.
    pub async fn soft_delete_category(&self, chat_id: i64, category_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            async {
                let result = categories::Entity::update_many()
                    .col_expr(categories::Column::IsDeleted, Expr::value(true))
                    .filter(categories::Column::Id.eq(category_id))
                    .filter(categories::Column::ChatId.eq(chat_id))
                    .filter(categories::Column::IsDeleted.eq(false))
                    .exec(&db_tx)
                    .await?;
                if result.rows_affected == 0 {
                    return Err(category_not_found(category_id));
                }

                let hidden = transactions::Entity::update_many()
                    .col_expr(transactions::Column::IsDeleted, Expr::value(true))
                    .filter(transactions::Column::CategoryId.eq(category_id))
                    .filter(transactions::Column::ChatId.eq(chat_id))
                    .exec(&db_tx)
                    .await?;
                tracing::debug!(
                    chat_id,
                    category_id,
                    transactions = hidden.rows_affected,
                    "category deleted"
                );
                Ok::<(), EngineError>(())
            }
            .await
        })
    }

    pub async fn live_categories(&self, chat_id: i64) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::ChatId.eq(chat_id))
            .filter(categories::Column::IsDeleted.eq(false))
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    pub(super) async fn live_category(
        &self,
        db_tx: &DatabaseTransaction,
        chat_id: i64,
        category_id: i64,
    ) -> ResultEngine<categories::Model> {
        categories::Entity::find_by_id(category_id)
            .filter(categories::Column::ChatId.eq(chat_id))
            .filter(categories::Column::IsDeleted.eq(false))
            .one(db_tx)
            .await?
            .ok_or_else(|| category_not_found(category_id))
    }
}

fn category_not_found(category_id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("category {category_id}"))
}
