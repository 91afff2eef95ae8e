use serde::{Deserialize, Serialize};

use super::{Resource, Validate, ValidationError, check_text};

/// An editor account.
///
/// `password` is stored and returned exactly as submitted; nothing hashes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Editor {
    pub id: i64,
    pub login: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorDraft {
    pub login: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

impl Validate for EditorDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check_text("login", &self.login, 64)?;
        check_text("password", &self.password, 128)?;
        check_text("firstname", &self.firstname, 64)?;
        check_text("lastname", &self.lastname, 64)
    }
}

impl Resource for Editor {
    type Draft = EditorDraft;

    const KIND: &'static str = "editor";

    fn from_parts(id: i64, d: EditorDraft) -> Self {
        Self {
            id,
            login: d.login,
            password: d.password,
            firstname: d.firstname,
            lastname: d.lastname,
        }
    }

    fn into_parts(self) -> (i64, EditorDraft) {
        let draft = EditorDraft {
            login: self.login,
            password: self.password,
            firstname: self.firstname,
            lastname: self.lastname,
        };
        (self.id, draft)
    }
}
