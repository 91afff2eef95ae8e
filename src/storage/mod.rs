//! Storage backends, one instance per resource kind.
//!
//! ```text
//!              ┌──────────────────┐
//!              │  Storage<T> trait │
//!              └──────────────────┘
//!                ↑              ↑
//!   ┌────────────┴───┐    ┌─────┴──────────┐
//!   │ MemoryStorage  │    │  SqlStorage    │
//!   │ (mutex + map)  │    │ (sqlx, SQLite) │
//!   └────────────────┘    └────────────────┘
//! ```
//!
//! Both backends follow one discipline: absence is `Option`/`bool`, and only
//! genuine failures are [`StorageError`]s.

mod error;
mod memory;
mod sql;

use async_trait::async_trait;

use crate::model::Resource;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use sql::{SqlStorage, Table, connect};

/// Persistence for one resource kind.
///
/// Ids are assigned by the backend on `create` and never change. Each
/// backend instance owns its own id sequence.
#[async_trait]
pub trait Storage<T: Resource>: Send + Sync {
    /// Persists a new record and returns its generated id.
    async fn create(&self, draft: &T::Draft) -> StorageResult<i64>;

    async fn read(&self, id: i64) -> StorageResult<Option<T>>;

    /// Every record, in ascending id order.
    async fn read_all(&self) -> StorageResult<Vec<T>>;

    /// Overwrites every field of `id`. Does nothing if `id` is absent.
    async fn update(&self, id: i64, draft: &T::Draft) -> StorageResult<()>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: i64) -> StorageResult<bool>;

    /// Checks that the backend can serve requests.
    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}
