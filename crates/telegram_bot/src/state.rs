use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

const SHARDS: usize = 16;

/// Where a user is in a multi-step dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum DialogState {
    #[default]
    Idle,
    AwaitingNewCategoryName,
    AwaitingRenameCategory {
        category_id: i64,
    },
    AwaitingPeriod,
}

/// In-memory dialog states keyed by Telegram user id.
///
/// The map is split into shards, each behind its own lock, so that users in
/// different shards never wait on each other. Nothing is persisted: a restart
/// forgets every pending dialog.
#[derive(Clone)]
pub(crate) struct SessionStore {
    shards: Arc<[Mutex<HashMap<u64, DialogState>>; SHARDS]>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            shards: Arc::new(std::array::from_fn(|_| Mutex::new(HashMap::new()))),
        }
    }
}

impl SessionStore {
    fn shard(&self, user_id: u64) -> &Mutex<HashMap<u64, DialogState>> {
        &self.shards[(user_id % SHARDS as u64) as usize]
    }

    pub(crate) async fn get(&self, user_id: u64) -> DialogState {
        let guard = self.shard(user_id).lock().await;
        guard.get(&user_id).cloned().unwrap_or_default()
    }

    /// Store the state, replacing any previous one. `Idle` removes the entry.
    pub(crate) async fn set(&self, user_id: u64, state: DialogState) {
        if state == DialogState::Idle {
            return self.clear(user_id).await;
        }
        self.shard(user_id).lock().await.insert(user_id, state);
    }

    pub(crate) async fn clear(&self, user_id: u64) {
        self.shard(user_id).lock().await.remove(&user_id);
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        let mut total = 0;
        for shard in self.shards.iter() {
            total += shard.lock().await.len();
        }
        total
    }
}
