use serde::{Deserialize, Serialize};

use super::{Resource, Validate, ValidationError, check_text};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDraft {
    pub name: String,
}

impl Validate for TagDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", &self.name, 32)
    }
}

impl Resource for Tag {
    type Draft = TagDraft;

    const KIND: &'static str = "tag";

    fn from_parts(id: i64, draft: TagDraft) -> Self {
        Self { id, name: draft.name }
    }

    fn into_parts(self) -> (i64, TagDraft) {
        (self.id, TagDraft { name: self.name })
    }
}
