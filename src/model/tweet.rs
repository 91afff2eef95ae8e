use serde::{Deserialize, Serialize};

use super::{Resource, Validate, ValidationError, check_text};

/// `editor_id` names an [`Editor`](super::Editor) but is never checked
/// against the editors store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: i64,
    pub editor_id: i64,
    pub title: String,
    pub content: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetDraft {
    pub editor_id: i64,
    pub title: String,
    pub content: String,
    pub name: String,
}

impl Validate for TweetDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title, 64)?;
        check_text("name", &self.name, 64)?;
        if self.content.trim().is_empty() {
            return Err(ValidationError::Blank { field: "content" });
        }
        Ok(())
    }
}

impl Resource for Tweet {
    type Draft = TweetDraft;

    const KIND: &'static str = "tweet";

    fn from_parts(id: i64, d: TweetDraft) -> Self {
        Self { id, editor_id: d.editor_id, title: d.title, content: d.content, name: d.name }
    }

    fn into_parts(self) -> (i64, TweetDraft) {
        let draft = TweetDraft {
            editor_id: self.editor_id,
            title: self.title,
            content: self.content,
            name: self.name,
        };
        (self.id, draft)
    }
}
