//! Per-resource route tables.
//!
//! Tags live at `/tags`; everything else under `/api/v1.0`. Tweets answer a
//! declined create with `400`, the other kinds with `403`.

use std::sync::Arc;

use super::mount;
use crate::router::Router;
use crate::service::{EditorService, PostService, TagService, TweetService};
use crate::status::Status;

pub const TAGS: &str = "/tags";
pub const EDITORS: &str = "/api/v1.0/editors";
pub const TWEETS: &str = "/api/v1.0/tweets";
pub const POSTS: &str = "/api/v1.0/posts";

pub fn tags(router: Router, service: Arc<TagService>) -> Router {
    mount(router, TAGS, service, Status::Forbidden)
}

pub fn editors(router: Router, service: Arc<EditorService>) -> Router {
    mount(router, EDITORS, service, Status::Forbidden)
}

pub fn tweets(router: Router, service: Arc<TweetService>) -> Router {
    mount(router, TWEETS, service, Status::BadRequest)
}

pub fn posts(router: Router, service: Arc<PostService>) -> Router {
    mount(router, POSTS, service, Status::Forbidden)
}
