use sea_orm::{ActiveModelTrait, TransactionTrait};

use crate::{NewTransaction, ResultEngine, Transaction};

use super::{Engine, with_tx};

impl Engine {
    /// Record a transaction against a live category owned by the same chat.
    pub async fn new_transaction(&self, transaction: NewTransaction) -> ResultEngine<Transaction> {
        transaction.validate()?;

        let created: Transaction = with_tx!(self, |db_tx| {
            async {
                self.live_category(&db_tx, transaction.chat_id, transaction.category_id)
                    .await?;
                let model = transaction.to_active().insert(&db_tx).await?;
                Transaction::try_from(model)
            }
            .await
        })?;

        tracing::debug!(
            chat_id = created.chat_id,
            category_id = created.category_id,
            kind = %created.kind,
            "transaction recorded"
        );
        Ok(created)
    }
}
