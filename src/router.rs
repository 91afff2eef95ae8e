//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Register a path, get a
//! handler.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::envelope::Envelope;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use editorial::{Method, Request, Response, Router};
    /// # async fn get_tag(_: Request) -> Response { Response::text("") }
    /// # async fn create_tag(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/tags/{id}", get_tag)
    ///     .on(Method::Post, "/tags",      create_tag);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an existing route.
    /// Routes are fixed at startup, so this is a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request to its handler. Unmatched requests answer `404`
    /// with the status envelope.
    pub(crate) async fn dispatch(&self, req: Request) -> Response {
        let method = req.method();
        let path = req.path().to_owned();

        let response = match self.lookup(method, &path) {
            Some((handler, params)) => handler.call(req.with_params(params)).await,
            None => Envelope::new(Status::NotFound).into_response(),
        };

        debug!(%method, %path, status = response.status_code().as_u16(), "handled");
        response
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
