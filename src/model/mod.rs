//! Resource records and their wire shapes.
//!
//! Every resource kind is a record (`id` plus fields) and a *draft* holding
//! just the fields. A draft is the create body; the full record, id included,
//! is the update body and every response body.

mod editor;
mod post;
mod tag;
mod tweet;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use editor::{Editor, EditorDraft};
pub use post::{Post, PostDraft};
pub use tag::{Tag, TagDraft};
pub use tweet::{Tweet, TweetDraft};

/// A resource kind served over HTTP and kept by a storage backend.
pub trait Resource:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    type Draft: Clone + fmt::Debug + Serialize + DeserializeOwned + Validate + Send + Sync + 'static;

    /// Singular name used in logs and error messages.
    const KIND: &'static str;

    fn from_parts(id: i64, draft: Self::Draft) -> Self;

    fn into_parts(self) -> (i64, Self::Draft);
}

/// Field checks applied at the handler boundary.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("`{field}` is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("`{field}` must not be blank")]
    Blank { field: &'static str },
}

/// Rejects blank values and values over `max` characters.
pub(crate) fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_text_counts_characters_not_bytes() {
        assert_eq!(check_text("name", "ñññ", 3), Ok(()));
        assert_eq!(
            check_text("name", "abcd", 3),
            Err(ValidationError::TooLong { field: "name", max: 3 })
        );
        assert_eq!(check_text("name", "  ", 3), Err(ValidationError::Blank { field: "name" }));
    }
}
