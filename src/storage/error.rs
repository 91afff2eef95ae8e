use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failures a storage backend cannot turn into a normal outcome.
///
/// A missing row is not an error: reads answer `None`, deletes answer
/// `false`, updates do nothing.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unable to retrieve the id of the newly inserted {kind}")]
    MissingGeneratedId { kind: &'static str },

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}
