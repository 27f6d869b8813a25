use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, prelude::*};

use crate::{CategoryStats, ResultEngine, TransactionKind, categories, transactions};

use super::Engine;

impl Engine {
    /// Sum live transactions in `[start, end)` by category name and kind.
    ///
    /// Transactions whose category is deleted are left out even if the
    /// transaction row itself was never marked.
    pub async fn stats_by_category(
        &self,
        chat_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultEngine<CategoryStats> {
        let rows = transactions::Entity::find()
            .find_also_related(categories::Entity)
            .filter(transactions::Column::ChatId.eq(chat_id))
            .filter(transactions::Column::IsDeleted.eq(false))
            .filter(transactions::Column::CreatedAt.gte(start))
            .filter(transactions::Column::CreatedAt.lt(end))
            .filter(categories::Column::ChatId.eq(chat_id))
            .filter(categories::Column::IsDeleted.eq(false))
            .all(&self.database)
            .await?;

        let mut stats = CategoryStats::default();
        for (transaction, category) in rows {
            let Some(category) = category else {
                continue;
            };
            let kind = TransactionKind::try_from(transaction.kind.as_str())?;
            stats.add(&category.name, kind, transaction.amount);
        }
        Ok(stats)
    }
}
