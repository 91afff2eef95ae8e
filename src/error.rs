//! Unified error type.

use thiserror::Error;

/// Infrastructure failures: binding a port, reading its address, or
/// opening the configured storage backend.
///
/// Application-level failures (bad input, unknown ids) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage: {0}")]
    Storage(#[from] crate::storage::StorageError),
}
