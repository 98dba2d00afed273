//! Character persistence behind an injected storage interface.
//!
//! Handlers only see [`CharacterStore`]. [`JsonFileStore`] is the real
//! database (one pretty-printed JSON array in one file); [`MemoryStore`]
//! backs tests.

mod file;
mod memory;

use std::future::Future;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::model::{Character, NewCharacter};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed database file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("no id left after {0}")]
    IdsExhausted(u64),
}

/// Where a store is in its one-time initialization.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StoreState {
    Uninitialized,
    Ready,
}

/// CRUD over the whole collection.
///
/// Every operation awaits [`ready`](CharacterStore::ready) first, so callers
/// never observe an uninitialized store.
#[async_trait]
pub trait CharacterStore: Send + Sync + 'static {
    fn state(&self) -> StoreState;

    /// Runs initialization once. Concurrent callers wait for the same attempt;
    /// a failed attempt is retried by the next caller.
    async fn ready(&self) -> Result<(), StoreError>;

    /// The full collection in stored order.
    async fn list(&self) -> Result<Vec<Character>, StoreError>;

    async fn get(&self, id: u64) -> Result<Option<Character>, StoreError>;

    /// Appends a record with id `max(existing) + 1`, or 1 when empty.
    async fn create(&self, new: NewCharacter) -> Result<Character, StoreError>;

    /// Returns `false` and leaves the collection untouched when `id` is absent.
    async fn delete(&self, id: u64) -> Result<bool, StoreError>;

    /// Replaces everything with `records`, numbered 1, 2, 3, …
    async fn replace_all(&self, records: Vec<NewCharacter>) -> Result<Vec<Character>, StoreError>;
}

/// `Uninitialized → Ready`, established once through an async once-cell.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    cell: OnceCell<()>,
}

impl Lifecycle {
    pub(crate) fn state(&self) -> StoreState {
        if self.cell.initialized() {
            StoreState::Ready
        } else {
            StoreState::Uninitialized
        }
    }

    pub(crate) async fn ready<F, Fut>(&self, init: F) -> Result<(), StoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), StoreError>>,
    {
        self.cell.get_or_try_init(init).await.map(|_| ())
    }
}

pub(crate) fn next_id(collection: &[Character]) -> Result<u64, StoreError> {
    let max = collection.iter().map(|c| c.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(StoreError::IdsExhausted(max))
}

pub(crate) fn number_sequentially(records: Vec<NewCharacter>) -> Vec<Character> {
    records
        .into_iter()
        .zip(1..)
        .map(|(record, id)| record.with_id(id))
        .collect()
}
