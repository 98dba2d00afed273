use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{next_id, number_sequentially, CharacterStore, Lifecycle, StoreError, StoreState};
use crate::model::{Character, NewCharacter};

/// The whole collection as one pretty-printed JSON array in one file.
///
/// Loaded fully for every operation and rewritten fully on every mutation.
/// A missing file reads as an empty collection; a file that is not a valid
/// array of characters is an error. Writes are not atomic.
///
/// Mutations through one `JsonFileStore` hold the write side of `lock`, so two
/// overlapping creates cannot both read the same `max(id)` and no reader sees
/// a half-written file. Other processes writing the same file are not
/// coordinated with.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lifecycle: Lifecycle,
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lifecycle: Lifecycle::default(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the database file. Callers hold `lock`.
    async fn load(&self) -> Result<Vec<Character>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "database file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrites the database file with `collection`. Callers hold the write
    /// side of `lock`.
    async fn save(&self, collection: &[Character]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(collection).map_err(StoreError::Encode)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|source| self.io_error(source))
    }

    /// Creates the parent directory and an empty database if needed, and
    /// checks that an existing file parses.
    async fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if exists {
            let count = self.load().await?.len();
            tracing::info!(path = %self.path.display(), count, "database loaded");
        } else {
            self.save(&[]).await?;
            tracing::info!(path = %self.path.display(), "created empty database");
        }
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

#[async_trait]
impl CharacterStore for JsonFileStore {
    fn state(&self) -> StoreState {
        self.lifecycle.state()
    }

    async fn ready(&self) -> Result<(), StoreError> {
        self.lifecycle.ready(|| self.initialize()).await
    }

    async fn list(&self) -> Result<Vec<Character>, StoreError> {
        self.ready().await?;
        let _guard = self.lock.read().await;
        self.load().await
    }

    async fn get(&self, id: u64) -> Result<Option<Character>, StoreError> {
        Ok(self.list().await?.into_iter().find(|c| c.id == id))
    }

    async fn create(&self, new: NewCharacter) -> Result<Character, StoreError> {
        self.ready().await?;
        let _guard = self.lock.write().await;

        let mut collection = self.load().await?;
        let character = new.with_id(next_id(&collection)?);
        collection.push(character.clone());
        self.save(&collection).await?;
        Ok(character)
    }

    async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        self.ready().await?;
        let _guard = self.lock.write().await;

        let mut collection = self.load().await?;
        let Some(index) = collection.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        collection.remove(index);
        self.save(&collection).await?;
        Ok(true)
    }

    async fn replace_all(&self, records: Vec<NewCharacter>) -> Result<Vec<Character>, StoreError> {
        self.ready().await?;
        let _guard = self.lock.write().await;

        let collection = number_sequentially(records);
        self.save(&collection).await?;
        Ok(collection)
    }
}
