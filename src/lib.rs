//! # editorial
//!
//! A CRUD backend for four resource kinds (editors, tweets, posts and tags),
//! served over a minimal hyper framework and kept either in memory or in
//! SQLite.
//!
//! ## Layers
//!
//! ```text
//! Router ── api handlers ── ResourceService<T> ── Storage<T>
//!                                                   ├─ MemoryStorage<T>
//!                                                   └─ SqlStorage<T>
//! ```
//!
//! Each layer can stop the request: handlers answer bad input with `400`,
//! services answer unknown ids with `None`, and storage failures surface as
//! `500`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use editorial::{Server, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), editorial::Error> {
//!     let services = app::Services::in_memory();
//!     Server::bind("0.0.0.0:24110".parse().unwrap())
//!         .serve(app::router(&services))
//!         .await
//! }
//! ```
//!
//! ## Wire contract
//!
//! Successful reads and writes answer with the record itself as JSON.
//! Everything without a record (failures, empty listings) answers
//! `{"status":<code>}`. Deletes answer `204` with no body.

mod envelope;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod app;
pub mod config;
pub mod health;
pub mod model;
pub mod service;
pub mod storage;

pub use envelope::Envelope;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
