//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, an [`Envelope`](crate::Envelope), or as a
//! bare handler return value.
//!
//! ```rust
//! use editorial::{Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::NoContent);
//!
//! // return Status directly from a handler
//! async fn delete_tag(_req: editorial::Request) -> Status {
//!     Status::NoContent
//! }
//! ```

use serde::{Serialize, Serializer};

/// The status codes this service emits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    Created,             // 201
    NoContent,           // 204
    BadRequest,          // 400
    Forbidden,           // 403
    NotFound,            // 404
    MethodNotAllowed,    // 405
    InternalServerError, // 500
    ServiceUnavailable,  // 503
}

impl Status {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Ok                  => 200,
            Self::Created             => 201,
            Self::NoContent           => 204,
            Self::BadRequest          => 400,
            Self::Forbidden           => 403,
            Self::NotFound            => 404,
            Self::MethodNotAllowed    => 405,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable  => 503,
        }
    }

    /// Whether a response with this status may carry a body (RFC 9110 §15.3.5).
    pub fn allows_body(self) -> bool {
        !matches!(self, Self::NoContent)
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        s.as_u16()
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        // Every variant is a registered code.
        http::StatusCode::from_u16(s.as_u16()).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Serialises as the bare numeric code.
impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_http_status_code() {
        assert_eq!(http::StatusCode::from(Status::Forbidden), http::StatusCode::FORBIDDEN);
        assert_eq!(u16::from(Status::NoContent), 204);
        assert!(!Status::NoContent.allows_body());
        assert!(Status::BadRequest.allows_body());
    }
}
