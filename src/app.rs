//! Composition: storage → services → routes.
//!
//! Every route handler receives its service here, explicitly.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use crate::config::{Backend, Config};
use crate::error::Error;
use crate::method::Method;
use crate::model::{Editor, Post, Tag, Tweet};
use crate::request::Request;
use crate::router::Router;
use crate::service::{EditorService, PostService, TagService, TweetService};
use crate::storage::{self, MemoryStorage, SqlStorage, StorageResult};
use crate::{api, health};

/// One service per resource kind, each over its own backend.
#[derive(Clone)]
pub struct Services {
    pub editors: Arc<EditorService>,
    pub tags: Arc<TagService>,
    pub tweets: Arc<TweetService>,
    pub posts: Arc<PostService>,
}

impl Services {
    pub fn in_memory() -> Self {
        Self {
            editors: Arc::new(EditorService::new(Arc::new(MemoryStorage::<Editor>::new()))),
            tags: Arc::new(TagService::new(Arc::new(MemoryStorage::<Tag>::new()))),
            tweets: Arc::new(TweetService::new(Arc::new(MemoryStorage::<Tweet>::new()))),
            posts: Arc::new(PostService::new(Arc::new(MemoryStorage::<Post>::new()))),
        }
    }

    /// Opens the backend `config` selects.
    pub async fn from_config(config: &Config) -> Result<Self, Error> {
        match config.storage {
            Backend::Memory => {
                info!("using in-memory storage");
                Ok(Self::in_memory())
            }
            Backend::Sqlite => {
                let pool = storage::connect(&config.database_url, config.max_connections).await?;
                Ok(Self::sqlite(pool).await?)
            }
        }
    }

    /// Tables share `pool`; each is created if missing.
    pub async fn sqlite(pool: SqlitePool) -> StorageResult<Self> {
        Ok(Self {
            editors: Arc::new(EditorService::new(Arc::new(
                SqlStorage::<Editor>::new(pool.clone()).await?,
            ))),
            tags: Arc::new(TagService::new(Arc::new(SqlStorage::<Tag>::new(pool.clone()).await?))),
            tweets: Arc::new(TweetService::new(Arc::new(
                SqlStorage::<Tweet>::new(pool.clone()).await?,
            ))),
            posts: Arc::new(PostService::new(Arc::new(SqlStorage::<Post>::new(pool).await?))),
        })
    }

    pub async fn ping(&self) -> StorageResult<()> {
        self.editors.ping().await?;
        self.tags.ping().await?;
        self.tweets.ping().await?;
        self.posts.ping().await
    }
}

/// Every resource route plus the health checks.
pub fn router(services: &Services) -> Router {
    let ready = services.clone();

    let router = Router::new()
        .on(Method::Get, "/healthz", health::liveness)
        .on(Method::Get, "/readyz", move |req: Request| health::readiness(ready.clone(), req));

    let router = api::tags(router, Arc::clone(&services.tags));
    let router = api::editors(router, Arc::clone(&services.editors));
    let router = api::tweets(router, Arc::clone(&services.tweets));
    api::posts(router, Arc::clone(&services.posts))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::{Value, json};

    use clap::Parser;

    use super::*;
    use crate::Status;

    async fn call(router: &Router, method: Method, path: &str, body: Value) -> (Status, Value) {
        let body = if body.is_null() { Bytes::new() } else { Bytes::from(body.to_string()) };
        let res = router.dispatch(Request::new(method, path.to_owned(), body)).await;
        let value = match res.body() {
            [] => Value::Null,
            bytes if res.headers.iter().any(|(_, v)| v == "application/json") => {
                serde_json::from_slice(bytes).unwrap()
            }
            bytes => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        };
        (res.status_code(), value)
    }

    async fn tag_lifecycle(app: Router) {
        assert_eq!(
            call(&app, Method::Post, "/tags", json!({ "name": "news" })).await,
            (Status::Created, json!({ "id": 1, "name": "news" }))
        );
        assert_eq!(
            call(&app, Method::Get, "/tags/1", Value::Null).await,
            (Status::Ok, json!({ "id": 1, "name": "news" }))
        );
        assert_eq!(
            call(&app, Method::Delete, "/tags/1", Value::Null).await,
            (Status::NoContent, Value::Null)
        );
        assert_eq!(
            call(&app, Method::Get, "/tags/1", Value::Null).await,
            (Status::BadRequest, json!({ "status": 400 }))
        );
    }

    #[tokio::test]
    async fn tag_lifecycle_in_memory() {
        tag_lifecycle(router(&Services::in_memory())).await;
    }

    #[tokio::test]
    async fn tag_lifecycle_in_sqlite() {
        let pool = storage::connect("sqlite::memory:", 1).await.unwrap();
        tag_lifecycle(router(&Services::sqlite(pool).await.unwrap())).await;
    }

    #[tokio::test]
    async fn updating_an_unknown_tag_is_a_bad_request() {
        let app = router(&Services::in_memory());
        assert_eq!(
            call(&app, Method::Put, "/tags", json!({ "id": 999, "name": "x" })).await,
            (Status::BadRequest, json!({ "status": 400 }))
        );
        assert_eq!(
            call(&app, Method::Get, "/tags", Value::Null).await,
            (Status::Ok, json!({ "status": 200 }))
        );
    }

    #[tokio::test]
    async fn tweets_live_under_the_versioned_prefix() {
        let app = router(&Services::in_memory());
        let draft = json!({ "editorId": 4, "title": "Launch", "content": "We shipped.", "name": "launch" });

        let (status, created) = call(&app, Method::Post, "/api/v1.0/tweets", draft).await;
        assert_eq!(status, Status::Created);
        assert_eq!(created["editorId"], 4);
        assert_eq!(created["name"], "launch");

        let edited = json!({
            "id": 1,
            "editorId": 4,
            "title": "Launch",
            "content": "Shipped!",
            "name": "launch-final"
        });
        assert_eq!(
            call(&app, Method::Put, "/api/v1.0/tweets", edited.clone()).await,
            (Status::Ok, edited.clone())
        );
        assert_eq!(
            call(&app, Method::Get, "/api/v1.0/tweets", Value::Null).await,
            (Status::Ok, json!([edited]))
        );
        assert_eq!(call(&app, Method::Get, "/tweets", Value::Null).await.0, Status::NotFound);
    }

    #[tokio::test]
    async fn each_kind_has_its_own_id_sequence() {
        let app = router(&Services::in_memory());
        let editor = json!({
            "login": "ada",
            "password": "secret",
            "firstname": "Ada",
            "lastname": "Lovelace"
        });
        let post = json!({
            "editorId": 1,
            "title": "Notes",
            "content": "On the engine.",
            "name": "notes"
        });

        let (_, editor) = call(&app, Method::Post, "/api/v1.0/editors", editor).await;
        let (_, post) = call(&app, Method::Post, "/api/v1.0/posts", post).await;
        assert_eq!(editor["id"], 1);
        assert_eq!(post["id"], 1);
        assert_eq!(editor["password"], "secret");
    }

    #[tokio::test]
    async fn sqlite_backend_opens_from_config() {
        let config = Config::try_parse_from([
            "editorial",
            "--storage",
            "sqlite",
            "--database-url",
            "sqlite::memory:",
        ])
        .unwrap();
        tag_lifecycle(router(&Services::from_config(&config).await.unwrap())).await;
    }

    #[tokio::test]
    async fn unopenable_database_is_a_storage_error() {
        let config = Config::try_parse_from([
            "editorial",
            "--storage",
            "sqlite",
            "--database-url",
            "sqlite:///no/such/directory/editorial.db?mode=rwc",
        ])
        .unwrap();
        let err = Services::from_config(&config).await.err().unwrap();
        assert!(matches!(err, Error::Storage(_)), "{err}");
    }

    #[tokio::test]
    async fn readiness_reflects_storage() {
        let app = router(&Services::in_memory());
        assert_eq!(
            call(&app, Method::Get, "/readyz", Value::Null).await,
            (Status::Ok, Value::String("ready".into()))
        );
        assert_eq!(
            call(&app, Method::Get, "/healthz", Value::Null).await,
            (Status::Ok, Value::String("ok".into()))
        );
    }
}
