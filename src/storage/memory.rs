//! In-memory storage backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::trace;

use super::{Storage, StorageError, StorageResult};
use crate::model::Resource;

/// Mutex-guarded ordered map of records.
///
/// Ids start at 1 and only ever grow, so id order is insertion order and a
/// deleted id is never handed out again. Every operation takes the lock, so
/// concurrent writers to one kind are serialised.
pub struct MemoryStorage<T> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    last_id: i64,
    records: BTreeMap<i64, T>,
}

impl<T> MemoryStorage<T> {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner { last_id: 0, records: BTreeMap::new() }) }
    }
}

impl<T> Default for MemoryStorage<T> {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl<T: Resource> Storage<T> for MemoryStorage<T> {
    async fn create(&self, draft: &T::Draft) -> StorageResult<i64> {
        let mut inner = self.inner.lock().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or(StorageError::MissingGeneratedId { kind: T::KIND })?;
        inner.last_id = id;
        inner.records.insert(id, T::from_parts(id, draft.clone()));
        trace!(kind = T::KIND, id, "inserted");
        Ok(id)
    }

    async fn read(&self, id: i64) -> StorageResult<Option<T>> {
        Ok(self.inner.lock().await.records.get(&id).cloned())
    }

    async fn read_all(&self) -> StorageResult<Vec<T>> {
        Ok(self.inner.lock().await.records.values().cloned().collect())
    }

    async fn update(&self, id: i64, draft: &T::Draft) -> StorageResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(record) = inner.records.get_mut(&id) {
            *record = T::from_parts(id, draft.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        Ok(self.inner.lock().await.records.remove(&id).is_some())
    }
}
