#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, NewTransaction, TransactionKind};
use migration::MigratorTrait;

pub const CHAT: i64 = 42;
pub const OTHER_CHAT: i64 = 7;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn expense(chat_id: i64, category_id: i64, amount: f64, created_at: DateTime<Utc>) -> NewTransaction {
    NewTransaction {
        chat_id,
        category_id,
        amount,
        kind: TransactionKind::Expense,
        created_at,
    }
}

pub fn income(chat_id: i64, category_id: i64, amount: f64, created_at: DateTime<Utc>) -> NewTransaction {
    NewTransaction {
        kind: TransactionKind::Income,
        ..expense(chat_id, category_id, amount, created_at)
    }
}

/// Count rows straight from the table, deleted ones included.
pub async fn count_rows(db: &DatabaseConnection, sql: &str, id: i64) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(backend, sql, vec![id.into()]))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}
