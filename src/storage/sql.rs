//! Relational storage backend over sqlx's SQLite driver.
//!
//! # Schema
//!
//! One table per resource kind, each with its own id sequence:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS editors (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     login VARCHAR(64) NOT NULL,
//!     password VARCHAR(128) NOT NULL,
//!     firstname VARCHAR(64) NOT NULL,
//!     lastname VARCHAR(64) NOT NULL
//! );
//! CREATE TABLE IF NOT EXISTS tags   (id …, name VARCHAR(32) NOT NULL);
//! CREATE TABLE IF NOT EXISTS tweets (id …, editor_id INTEGER NOT NULL, title VARCHAR(64) NOT NULL, content TEXT NOT NULL, name VARCHAR(64) NOT NULL);
//! CREATE TABLE IF NOT EXISTS posts  (same columns as tweets);
//! ```
//!
//! `editor_id` carries no foreign key. Every operation is one statement; a
//! create followed by its read-back is not atomic.

use std::marker::PhantomData;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, Sqlite};
use tracing::{debug, info};

use super::{Storage, StorageError, StorageResult};
use crate::model::{Editor, EditorDraft, Post, PostDraft, Resource, Tag, TagDraft, Tweet, TweetDraft};

type Query<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Opens a SQLite pool, creating the database file if needed.
///
/// In-memory databases live and die with their connection, so `:memory:`
/// URLs get exactly one connection that is never recycled.
pub async fn connect(url: &str, max_connections: u32) -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool_options = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };
    let max_connections = pool_options.get_max_connections();
    let pool = pool_options.connect_with(options).await?;

    info!(url, max_connections, "database connected");
    Ok(pool)
}

/// Binds a resource kind to its table.
///
/// `UPDATE` takes the draft's fields followed by the id. `INSERT` must
/// return the generated id as its only column.
pub trait Table: Resource + for<'r> FromRow<'r, SqliteRow> {
    const CREATE_TABLE: &'static str;
    const INSERT: &'static str;
    const SELECT_BY_ID: &'static str;
    const SELECT_ALL: &'static str;
    const UPDATE: &'static str;
    const DELETE: &'static str;

    /// Binds the draft's fields in column order.
    fn bind_draft<'q>(query: Query<'q>, draft: &'q Self::Draft) -> Query<'q>;
}

/// A table-backed [`Storage`] sharing the pool with the other kinds.
pub struct SqlStorage<T> {
    pool: SqlitePool,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Table> SqlStorage<T> {
    /// Creates the backing table if it does not exist yet.
    pub async fn new(pool: SqlitePool) -> StorageResult<Self> {
        sqlx::query(T::CREATE_TABLE).execute(&pool).await?;
        debug!(kind = T::KIND, "schema ready");
        Ok(Self { pool, _kind: PhantomData })
    }
}

#[async_trait]
impl<T: Table> Storage<T> for SqlStorage<T> {
    async fn create(&self, draft: &T::Draft) -> StorageResult<i64> {
        let row = T::bind_draft(sqlx::query(T::INSERT), draft)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.try_get::<i64, _>(0)?),
            None => Err(StorageError::MissingGeneratedId { kind: T::KIND }),
        }
    }

    async fn read(&self, id: i64) -> StorageResult<Option<T>> {
        let record = sqlx::query_as::<_, T>(T::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn read_all(&self) -> StorageResult<Vec<T>> {
        Ok(sqlx::query_as::<_, T>(T::SELECT_ALL).fetch_all(&self.pool).await?)
    }

    async fn update(&self, id: i64, draft: &T::Draft) -> StorageResult<()> {
        T::bind_draft(sqlx::query(T::UPDATE), draft)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query(T::DELETE).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ── Tables ───────────────────────────────────────────────────────────────────

impl Table for Editor {
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS editors (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        login VARCHAR(64) NOT NULL, \
        password VARCHAR(128) NOT NULL, \
        firstname VARCHAR(64) NOT NULL, \
        lastname VARCHAR(64) NOT NULL)";
    const INSERT: &'static str =
        "INSERT INTO editors (login, password, firstname, lastname) VALUES (?, ?, ?, ?) RETURNING id";
    const SELECT_BY_ID: &'static str =
        "SELECT id, login, password, firstname, lastname FROM editors WHERE id = ?";
    const SELECT_ALL: &'static str =
        "SELECT id, login, password, firstname, lastname FROM editors ORDER BY id";
    const UPDATE: &'static str =
        "UPDATE editors SET login = ?, password = ?, firstname = ?, lastname = ? WHERE id = ?";
    const DELETE: &'static str = "DELETE FROM editors WHERE id = ?";

    fn bind_draft<'q>(query: Query<'q>, draft: &'q EditorDraft) -> Query<'q> {
        query
            .bind(&draft.login)
            .bind(&draft.password)
            .bind(&draft.firstname)
            .bind(&draft.lastname)
    }
}

impl Table for Tag {
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS tags (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        name VARCHAR(32) NOT NULL)";
    const INSERT: &'static str = "INSERT INTO tags (name) VALUES (?) RETURNING id";
    const SELECT_BY_ID: &'static str = "SELECT id, name FROM tags WHERE id = ?";
    const SELECT_ALL: &'static str = "SELECT id, name FROM tags ORDER BY id";
    const UPDATE: &'static str = "UPDATE tags SET name = ? WHERE id = ?";
    const DELETE: &'static str = "DELETE FROM tags WHERE id = ?";

    fn bind_draft<'q>(query: Query<'q>, draft: &'q TagDraft) -> Query<'q> {
        query.bind(&draft.name)
    }
}

impl Table for Tweet {
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS tweets (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        editor_id INTEGER NOT NULL, \
        title VARCHAR(64) NOT NULL, \
        content TEXT NOT NULL, \
        name VARCHAR(64) NOT NULL)";
    const INSERT: &'static str =
        "INSERT INTO tweets (editor_id, title, content, name) VALUES (?, ?, ?, ?) RETURNING id";
    const SELECT_BY_ID: &'static str =
        "SELECT id, editor_id, title, content, name FROM tweets WHERE id = ?";
    const SELECT_ALL: &'static str =
        "SELECT id, editor_id, title, content, name FROM tweets ORDER BY id";
    const UPDATE: &'static str =
        "UPDATE tweets SET editor_id = ?, title = ?, content = ?, name = ? WHERE id = ?";
    const DELETE: &'static str = "DELETE FROM tweets WHERE id = ?";

    fn bind_draft<'q>(query: Query<'q>, draft: &'q TweetDraft) -> Query<'q> {
        query
            .bind(draft.editor_id)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(&draft.name)
    }
}

impl Table for Post {
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS posts (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        editor_id INTEGER NOT NULL, \
        title VARCHAR(64) NOT NULL, \
        content TEXT NOT NULL, \
        name VARCHAR(64) NOT NULL)";
    const INSERT: &'static str =
        "INSERT INTO posts (editor_id, title, content, name) VALUES (?, ?, ?, ?) RETURNING id";
    const SELECT_BY_ID: &'static str =
        "SELECT id, editor_id, title, content, name FROM posts WHERE id = ?";
    const SELECT_ALL: &'static str =
        "SELECT id, editor_id, title, content, name FROM posts ORDER BY id";
    const UPDATE: &'static str =
        "UPDATE posts SET editor_id = ?, title = ?, content = ?, name = ? WHERE id = ?";
    const DELETE: &'static str = "DELETE FROM posts WHERE id = ?";

    fn bind_draft<'q>(query: Query<'q>, draft: &'q PostDraft) -> Query<'q> {
        query
            .bind(draft.editor_id)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(&draft.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store<T: Table>() -> SqlStorage<T> {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        SqlStorage::new(pool).await.unwrap()
    }

    fn tweet(title: &str) -> TweetDraft {
        TweetDraft {
            editor_id: 1,
            title: title.to_owned(),
            content: "body".to_owned(),
            name: format!("{title}-name"),
        }
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let store = store::<Tweet>().await;
        let id = store.create(&tweet("first")).await.unwrap();

        let read = store.read(id).await.unwrap().unwrap();
        assert_eq!(read, Tweet::from_parts(id, tweet("first")));
    }

    #[tokio::test]
    async fn update_rewrites_every_post_column() {
        let store = store::<Post>().await;
        let draft = PostDraft {
            editor_id: 1,
            title: "Notes".into(),
            content: "draft".into(),
            name: "notes".into(),
        };
        let id = store.create(&draft).await.unwrap();

        let edited = PostDraft { editor_id: 2, content: "final".into(), name: "notes-v2".into(), ..draft };
        store.update(id, &edited).await.unwrap();
        assert_eq!(store.read(id).await.unwrap(), Some(Post::from_parts(id, edited)));
    }

    #[tokio::test]
    async fn missing_row_reads_as_none() {
        let store = store::<Tag>().await;
        assert!(store.read(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let store = store::<Tag>().await;
        let id = store.create(&TagDraft { name: "news".into() }).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn update_of_missing_id_touches_nothing() {
        let store = store::<Tag>().await;
        store.update(5, &TagDraft { name: "x".into() }).await.unwrap();
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn schema_bootstrap_is_repeatable() {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        let first = SqlStorage::<Editor>::new(pool.clone()).await.unwrap();
        first
            .create(&EditorDraft {
                login: "ada".into(),
                password: "secret".into(),
                firstname: "Ada".into(),
                lastname: "Lovelace".into(),
            })
            .await
            .unwrap();

        let second = SqlStorage::<Editor>::new(pool).await.unwrap();
        assert_eq!(second.read_all().await.unwrap().len(), 1);
        second.ping().await.unwrap();
    }
}
