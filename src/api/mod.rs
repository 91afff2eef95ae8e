//! Route handlers shared by every resource kind.
//!
//! Each handler is one linear pass: parse the path id or body, call the
//! service, map the outcome to a status.
//!
//! | Route | Success | Failure |
//! |---|---|---|
//! | `GET {base}` | `200` + list, `200` + envelope when empty | `500` |
//! | `POST {base}` | `201` + record | `400` bad body, rejection status otherwise |
//! | `GET {base}/{id}` | `200` + record | `400` |
//! | `PUT {base}` | `200` + record | `400` |
//! | `DELETE {base}/{id}` | `204` | `400` |
//!
//! Unknown ids answer `400`, not `404`. Failure bodies are the bare
//! [`Envelope`].

mod routes;

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, warn};

use crate::envelope::Envelope;
use crate::method::Method;
use crate::model::{Resource, Validate};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::service::ResourceService;
use crate::status::Status;
use crate::storage::StorageError;

pub use routes::{editors, posts, tags, tweets};

/// Why a request did not succeed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unparseable id or body, failed field checks, or an unknown id.
    #[error("bad request")]
    BadRequest,

    /// The service declined to create the record.
    #[error("create rejected")]
    Rejected(Status),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest => Status::BadRequest,
            Self::Rejected(status) => status,
            Self::Storage(e) => {
                error!("storage failure: {e}");
                Status::InternalServerError
            }
        };
        Envelope::new(status).into_response()
    }
}

/// Registers the five routes of one resource kind under `base`.
///
/// `on_reject` is the status answered when a create is declined.
pub fn mount<T: Resource>(
    router: Router,
    base: &str,
    service: Arc<ResourceService<T>>,
    on_reject: Status,
) -> Router {
    let by_id = format!("{base}/{{id}}");
    let no_id = format!("{base}/");

    let (list, add, one, edit, remove) = (
        Arc::clone(&service),
        Arc::clone(&service),
        Arc::clone(&service),
        Arc::clone(&service),
        service,
    );

    router
        .on(Method::Get, base, move |req: Request| get_all(Arc::clone(&list), req))
        .on(Method::Post, base, move |req: Request| create(Arc::clone(&add), on_reject, req))
        .on(Method::Get, &by_id, move |req: Request| get_by_id(Arc::clone(&one), req))
        .on(Method::Put, base, move |req: Request| update(Arc::clone(&edit), req))
        .on(Method::Delete, &by_id, move |req: Request| delete(Arc::clone(&remove), req))
        .on(Method::Get, &no_id, missing_id)
        .on(Method::Delete, &no_id, missing_id)
}

async fn get_all<T: Resource>(
    service: Arc<ResourceService<T>>,
    _req: Request,
) -> Result<Response, ApiError> {
    let records = service.get_all().await?;
    if records.is_empty() {
        return Ok(Envelope::new(Status::Ok).into_response());
    }
    Ok(Json::ok(records).into_response())
}

async fn create<T: Resource>(
    service: Arc<ResourceService<T>>,
    on_reject: Status,
    req: Request,
) -> Result<Response, ApiError> {
    let draft: T::Draft = body(&req)?;
    check(&draft)?;

    match service.create(draft).await {
        Ok(Some(record)) => Ok(Json::with_status(Status::Created, record).into_response()),
        Ok(None) => {
            warn!(kind = T::KIND, "created record vanished before read-back");
            Err(ApiError::Rejected(on_reject))
        }
        Err(e) => {
            warn!(kind = T::KIND, "create rejected: {e}");
            Err(ApiError::Rejected(on_reject))
        }
    }
}

async fn get_by_id<T: Resource>(
    service: Arc<ResourceService<T>>,
    req: Request,
) -> Result<Json<T>, ApiError> {
    let id = path_id(&req)?;
    service.get_by_id(id).await?.map(Json::ok).ok_or(ApiError::BadRequest)
}

async fn update<T: Resource>(
    service: Arc<ResourceService<T>>,
    req: Request,
) -> Result<Json<T>, ApiError> {
    let record: T = body(&req)?;
    let (_, draft) = record.clone().into_parts();
    check(&draft)?;

    service.update(record).await?.map(Json::ok).ok_or(ApiError::BadRequest)
}

async fn delete<T: Resource>(
    service: Arc<ResourceService<T>>,
    req: Request,
) -> Result<Status, ApiError> {
    let id = path_id(&req)?;
    if service.delete(id).await? {
        Ok(Status::NoContent)
    } else {
        Err(ApiError::BadRequest)
    }
}

async fn missing_id(_req: Request) -> ApiError {
    ApiError::BadRequest
}

fn path_id(req: &Request) -> Result<i64, ApiError> {
    let raw = req.param("id").ok_or(ApiError::BadRequest)?;
    raw.parse().map_err(|_| {
        warn!(path = req.path(), "non-numeric id");
        ApiError::BadRequest
    })
}

fn body<B: serde::de::DeserializeOwned>(req: &Request) -> Result<B, ApiError> {
    req.json().map_err(|e| {
        warn!(path = req.path(), "malformed body: {e}");
        ApiError::BadRequest
    })
}

fn check(draft: &impl Validate) -> Result<(), ApiError> {
    draft.validate().map_err(|e| {
        warn!("invalid body: {e}");
        ApiError::BadRequest
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::{Value, json};

    use super::*;
    use crate::model::Tag;
    use crate::storage::{MemoryStorage, Storage, StorageResult};

    fn router(on_reject: Status) -> Router {
        let service = Arc::new(ResourceService::<Tag>::new(Arc::new(MemoryStorage::<Tag>::new())));
        mount(Router::new(), "/tags", service, on_reject)
    }

    async fn call(router: &Router, method: Method, path: &str, body: &str) -> (Status, Value) {
        let req = Request::new(method, path.to_owned(), Bytes::from(body.to_owned()));
        let res = router.dispatch(req).await;
        let value = if res.body().is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(res.body()).unwrap()
        };
        (res.status_code(), value)
    }

    #[tokio::test]
    async fn empty_listing_is_ok_with_envelope() {
        let app = router(Status::Forbidden);
        assert_eq!(
            call(&app, Method::Get, "/tags", "").await,
            (Status::Ok, json!({ "status": 200 }))
        );
    }

    #[tokio::test]
    async fn non_numeric_ids_are_bad_requests() {
        let app = router(Status::Forbidden);
        for method in [Method::Get, Method::Delete] {
            for path in ["/tags/abc", "/tags/1.5", "/tags/"] {
                assert_eq!(
                    call(&app, method, path, "").await,
                    (Status::BadRequest, json!({ "status": 400 })),
                    "{method} {path}"
                );
            }
        }
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let app = router(Status::Forbidden);
        for body in ["", "{", r#"{"title":"x"}"#, r#"{"name":7}"#, r#"{"name":"   "}"#] {
            let (status, _) = call(&app, Method::Post, "/tags", body).await;
            assert_eq!(status, Status::BadRequest, "{body}");
        }

        let too_long = json!({ "name": "x".repeat(33) }).to_string();
        assert_eq!(call(&app, Method::Post, "/tags", &too_long).await.0, Status::BadRequest);

        let without_id = r#"{"name":"news"}"#;
        assert_eq!(call(&app, Method::Put, "/tags", without_id).await.0, Status::BadRequest);
    }

    #[tokio::test]
    async fn delete_answers_no_content_without_body() {
        let app = router(Status::Forbidden);
        call(&app, Method::Post, "/tags", r#"{"name":"news"}"#).await;

        assert_eq!(call(&app, Method::Delete, "/tags/1", "").await, (Status::NoContent, Value::Null));
        assert_eq!(call(&app, Method::Delete, "/tags/1", "").await.0, Status::BadRequest);
    }

    /// Fails every create; listing hits a closed pool.
    struct Broken;

    #[async_trait::async_trait]
    impl<T: Resource> Storage<T> for Broken {
        async fn create(&self, _: &T::Draft) -> StorageResult<i64> {
            Err(StorageError::MissingGeneratedId { kind: T::KIND })
        }
        async fn read(&self, _: i64) -> StorageResult<Option<T>> { Ok(None) }
        async fn read_all(&self) -> StorageResult<Vec<T>> {
            Err(StorageError::Database(sqlx::Error::PoolClosed))
        }
        async fn update(&self, _: i64, _: &T::Draft) -> StorageResult<()> { Ok(()) }
        async fn delete(&self, _: i64) -> StorageResult<bool> { Ok(false) }
    }

    fn broken<T: Resource>() -> Arc<ResourceService<T>> {
        Arc::new(ResourceService::new(Arc::new(Broken)))
    }

    #[tokio::test]
    async fn declined_creates_answer_each_kinds_rejection_status() {
        let app = tags(Router::new(), broken());
        let app = editors(app, broken());
        let app = tweets(app, broken());
        let app = posts(app, broken());

        let editor = json!({
            "login": "ada",
            "password": "secret",
            "firstname": "Ada",
            "lastname": "Lovelace"
        });
        let article = json!({ "editorId": 1, "title": "t", "content": "c", "name": "n" });

        let cases = [
            ("/tags", json!({ "name": "news" }), Status::Forbidden),
            ("/api/v1.0/editors", editor, Status::Forbidden),
            ("/api/v1.0/tweets", article.clone(), Status::BadRequest),
            ("/api/v1.0/posts", article, Status::Forbidden),
        ];
        for (path, body, expected) in cases {
            let (status, envelope) = call(&app, Method::Post, path, &body.to_string()).await;
            assert_eq!(status, expected, "{path}");
            assert_eq!(envelope, json!({ "status": expected.as_u16() }), "{path}");
        }
    }

    #[tokio::test]
    async fn storage_failure_outside_create_is_a_server_error() {
        let app = tags(Router::new(), broken());
        assert_eq!(
            call(&app, Method::Get, "/tags", "").await,
            (Status::InternalServerError, json!({ "status": 500 }))
        );
    }
}
