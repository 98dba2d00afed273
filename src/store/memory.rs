use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{next_id, number_sequentially, CharacterStore, Lifecycle, StoreError, StoreState};
use crate::model::{Character, NewCharacter};

/// In-memory collection, for tests and throwaway servers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lifecycle: Lifecycle,
    records: RwLock<Vec<Character>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Character>) -> Self {
        Self { lifecycle: Lifecycle::default(), records: RwLock::new(records) }
    }
}

#[async_trait]
impl CharacterStore for MemoryStore {
    fn state(&self) -> StoreState {
        self.lifecycle.state()
    }

    async fn ready(&self) -> Result<(), StoreError> {
        self.lifecycle.ready(|| async { Ok::<(), StoreError>(()) }).await
    }

    async fn list(&self) -> Result<Vec<Character>, StoreError> {
        self.ready().await?;
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: u64) -> Result<Option<Character>, StoreError> {
        self.ready().await?;
        Ok(self.records.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, new: NewCharacter) -> Result<Character, StoreError> {
        self.ready().await?;
        let mut records = self.records.write().await;
        let character = new.with_id(next_id(&records)?);
        records.push(character.clone());
        Ok(character)
    }

    async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        self.ready().await?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|c| c.id != id);
        Ok(records.len() < before)
    }

    async fn replace_all(&self, records: Vec<NewCharacter>) -> Result<Vec<Character>, StoreError> {
        self.ready().await?;
        let collection = number_sequentially(records);
        *self.records.write().await = collection.clone();
        Ok(collection)
    }
}
