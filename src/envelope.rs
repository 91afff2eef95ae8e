//! The body sent when a response carries no resource.
//!
//! Failures and empty listings answer `{"status":<code>}` and nothing else:
//! no message, no detail. The envelope's code is also the HTTP status.

use serde::Serialize;

use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Envelope {
    pub status: Status,
}

impl Envelope {
    pub fn new(status: Status) -> Self {
        Self { status }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        Json::with_status(self.status, self).into_response()
    }
}
