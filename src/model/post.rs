use serde::{Deserialize, Serialize};

use super::{Resource, Validate, ValidationError, check_text};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub editor_id: i64,
    pub title: String,
    pub content: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub editor_id: i64,
    pub title: String,
    pub content: String,
    pub name: String,
}

impl Validate for PostDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title, 64)?;
        check_text("name", &self.name, 64)?;
        if self.content.trim().is_empty() {
            return Err(ValidationError::Blank { field: "content" });
        }
        Ok(())
    }
}

impl Resource for Post {
    type Draft = PostDraft;

    const KIND: &'static str = "post";

    fn from_parts(id: i64, d: PostDraft) -> Self {
        Self { id, editor_id: d.editor_id, title: d.title, content: d.content, name: d.name }
    }

    fn into_parts(self) -> (i64, PostDraft) {
        let draft = PostDraft {
            editor_id: self.editor_id,
            title: self.title,
            content: self.content,
            name: self.name,
        };
        (self.id, draft)
    }
}
