//! In-memory collaborators for router tests.

use std::sync::{
    Mutex,
    atomic::{AtomicI32, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use engine::{
    Category, CategoryStats, EngineError, NewTransaction, NewUser, Repository, ResultEngine,
    Transaction, TransactionKind, User,
};

use crate::{
    BotError,
    commands::Command,
    transport::{Keyboard, MessageHandle, Sender, Transport, Update, UpdateKind},
};

pub(crate) const CHAT: i64 = 100;
pub(crate) const USER: u64 = 100;

fn update(kind: UpdateKind, origin: Option<MessageHandle>) -> Update {
    Update {
        chat_id: CHAT,
        user_id: USER,
        sender: Sender {
            username: Some("alice".to_string()),
            language: Some("en".to_string()),
        },
        origin,
        kind,
    }
}

pub(crate) fn command(command: Command) -> Update {
    update(UpdateKind::Command(command), None)
}

pub(crate) fn text(text: &str) -> Update {
    update(UpdateKind::Text(text.to_string()), None)
}

pub(crate) fn callback(payload: &str, origin: Option<MessageHandle>) -> Update {
    update(UpdateKind::Callback(payload.to_string()), origin)
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    last_window: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Keeps everything in vectors and follows the engine's rules for ownership
/// and soft deletes.
#[derive(Default)]
pub(crate) struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub(crate) fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.tables.lock().unwrap().transactions.clone()
    }

    /// The window of the last statistics query.
    pub(crate) fn last_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.tables.lock().unwrap().last_window
    }

    pub(crate) async fn insert_transaction(
        &self,
        chat_id: i64,
        category_id: i64,
        amount: f64,
        kind: TransactionKind,
        created_at: DateTime<Utc>,
    ) {
        self.add_transaction(NewTransaction {
            chat_id,
            category_id,
            amount,
            kind,
            created_at,
        })
        .await
        .unwrap();
    }
}

fn not_found(category_id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("category {category_id}"))
}

fn live_category(tables: &mut Tables, chat_id: i64, category_id: i64) -> ResultEngine<&mut Category> {
    tables
        .categories
        .iter_mut()
        .find(|c| c.id == category_id && c.chat_id == chat_id && !c.is_deleted)
        .ok_or_else(|| not_found(category_id))
}

fn required_name(name: &str) -> ResultEngine<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::InvalidName(
            "category name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn add_user(&self, user: NewUser) -> ResultEngine<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.chat_id == user.chat_id) {
            return Ok(false);
        }
        tables.users.push(User {
            chat_id: user.chat_id,
            username: user.username,
            language: user.language,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn user_by_chat_id(&self, chat_id: i64) -> ResultEngine<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.chat_id == chat_id).cloned())
    }

    async fn add_category(&self, chat_id: i64, name: &str) -> ResultEngine<Category> {
        let name = required_name(name)?;
        let mut tables = self.tables.lock().unwrap();
        let category = Category {
            id: tables.categories.len() as i64 + 1,
            chat_id,
            name,
            created_at: Utc::now(),
            is_deleted: false,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn rename_category(&self, chat_id: i64, category_id: i64, name: &str) -> ResultEngine<()> {
        let name = required_name(name)?;
        let mut tables = self.tables.lock().unwrap();
        live_category(&mut tables, chat_id, category_id)?.name = name;
        Ok(())
    }

    async fn delete_category(&self, chat_id: i64, category_id: i64) -> ResultEngine<()> {
        let mut tables = self.tables.lock().unwrap();
        live_category(&mut tables, chat_id, category_id)?.is_deleted = true;
        for transaction in tables
            .transactions
            .iter_mut()
            .filter(|t| t.category_id == category_id)
        {
            transaction.is_deleted = true;
        }
        Ok(())
    }

    async fn categories_by_chat_id(&self, chat_id: i64) -> ResultEngine<Vec<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .categories
            .iter()
            .filter(|c| c.chat_id == chat_id && !c.is_deleted)
            .cloned()
            .collect())
    }

    async fn add_transaction(&self, transaction: NewTransaction) -> ResultEngine<Transaction> {
        transaction.validate()?;
        let mut tables = self.tables.lock().unwrap();
        live_category(&mut tables, transaction.chat_id, transaction.category_id)?;
        let created = Transaction {
            id: tables.transactions.len() as i64 + 1,
            chat_id: transaction.chat_id,
            category_id: transaction.category_id,
            amount: transaction.amount,
            kind: transaction.kind,
            created_at: transaction.created_at,
            is_deleted: false,
        };
        tables.transactions.push(created.clone());
        Ok(created)
    }

    async fn transaction_stats(
        &self,
        chat_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultEngine<CategoryStats> {
        let mut tables = self.tables.lock().unwrap();
        tables.last_window = Some((start, end));

        let mut stats = CategoryStats::default();
        for transaction in tables.transactions.iter().filter(|t| {
            t.chat_id == chat_id && !t.is_deleted && start <= t.created_at && t.created_at < end
        }) {
            let category = tables
                .categories
                .iter()
                .find(|c| c.id == transaction.category_id && !c.is_deleted);
            if let Some(category) = category {
                stats.add(&category.name, transaction.kind, transaction.amount);
            }
        }
        Ok(stats)
    }
}

/// A message as the transport saw it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Sent {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub handle: MessageHandle,
    /// Set when an existing message was edited instead of sending a new one.
    pub edited: Option<MessageHandle>,
}

#[derive(Default)]
pub(crate) struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicI32,
    fail_edits: bool,
}

impl RecordingTransport {
    pub(crate) fn with_failing_edits() -> Self {
        Self {
            fail_edits: true,
            ..Self::default()
        }
    }

    pub(crate) fn last(&self) -> Sent {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }

    pub(crate) fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|sent| sent.text.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageHandle, BotError> {
        let handle = MessageHandle {
            chat_id,
            message_id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        self.sent.lock().unwrap().push(Sent {
            text: text.to_string(),
            keyboard: keyboard.cloned(),
            handle,
            edited: None,
        });
        Ok(handle)
    }

    async fn edit_message(
        &self,
        handle: MessageHandle,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), BotError> {
        if self.fail_edits {
            return Err(BotError::Request(teloxide::RequestError::Api(
                teloxide::ApiError::MessageCantBeEdited,
            )));
        }
        self.sent.lock().unwrap().push(Sent {
            text: text.to_string(),
            keyboard: keyboard.cloned(),
            handle,
            edited: Some(handle),
        });
        Ok(())
    }
}
