//! Budget engine.
//!
//! Owns the users, categories and transactions of every chat and answers the
//! per-category statistics query. Everything is persisted with sea-orm; the
//! [`Repository`] trait is the surface the bot talks to.

pub use categories::Category;
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use repository::Repository;
pub use statistics::CategoryStats;
pub use transactions::{NewTransaction, Transaction, TransactionKind};
pub use users::{NewUser, User};

mod categories;
mod error;
mod ops;
mod repository;
mod statistics;
mod transactions;
mod users;

pub type ResultEngine<T> = Result<T, EngineError>;
