//! Resource services: the layer between route handlers and storage.
//!
//! A service decides "found" versus "not found" and hands back whole
//! records. Storage failures pass through untouched.

use std::sync::Arc;

use tracing::debug;

use crate::model::{Editor, Post, Resource, Tag, Tweet};
use crate::storage::{Storage, StorageResult};

pub type EditorService = ResourceService<Editor>;
pub type TagService = ResourceService<Tag>;
pub type TweetService = ResourceService<Tweet>;
pub type PostService = ResourceService<Post>;

pub struct ResourceService<T: Resource> {
    storage: Arc<dyn Storage<T>>,
}

impl<T: Resource> ResourceService<T> {
    pub fn new(storage: Arc<dyn Storage<T>>) -> Self {
        Self { storage }
    }

    /// Stores `draft` and returns the record as read back under its new id.
    ///
    /// `None` means the record vanished between insert and read-back.
    pub async fn create(&self, draft: T::Draft) -> StorageResult<Option<T>> {
        let id = self.storage.create(&draft).await?;
        debug!(kind = T::KIND, id, "created");
        self.storage.read(id).await
    }

    /// Replaces every field of an existing record. Never inserts: an unknown
    /// id yields `None`.
    pub async fn update(&self, record: T) -> StorageResult<Option<T>> {
        let (id, draft) = record.into_parts();
        if self.storage.read(id).await?.is_none() {
            return Ok(None);
        }
        self.storage.update(id, &draft).await?;
        debug!(kind = T::KIND, id, "updated");
        self.storage.read(id).await
    }

    pub async fn get_by_id(&self, id: i64) -> StorageResult<Option<T>> {
        self.storage.read(id).await
    }

    pub async fn get_all(&self) -> StorageResult<Vec<T>> {
        self.storage.read_all().await
    }

    /// Returns `true` iff a record was removed.
    pub async fn delete(&self, id: i64) -> StorageResult<bool> {
        let removed = self.storage.delete(id).await?;
        debug!(kind = T::KIND, id, removed, "delete");
        Ok(removed)
    }

    pub async fn ping(&self) -> StorageResult<()> {
        self.storage.ping().await
    }
}
