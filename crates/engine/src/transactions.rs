//! Transaction primitives.
//!
//! A `Transaction` records a single income or expense against a category.
//! The amount is always a positive magnitude, the direction lives in
//! [`TransactionKind`].

use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub chat_id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Data needed to record a transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub chat_id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
}

impl NewTransaction {
    /// Amounts must be positive and finite.
    pub fn validate(&self) -> ResultEngine<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be a positive number, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    pub(crate) fn to_active(&self) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            chat_id: ActiveValue::Set(self.chat_id),
            category_id: ActiveValue::Set(self.category_id),
            amount: ActiveValue::Set(self.amount),
            kind: ActiveValue::Set(self.kind.as_str().to_string()),
            created_at: ActiveValue::Set(self.created_at),
            is_deleted: ActiveValue::Set(false),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub chat_id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub kind: String,
    pub created_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            chat_id: model.chat_id,
            category_id: model.category_id,
            amount: model.amount,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            created_at: model.created_at,
            is_deleted: model.is_deleted,
        })
    }
}
