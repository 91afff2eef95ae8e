//! Kubernetes health-check handlers.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can every storage backend serve? Failure → pulled from load-balancer. |

use tracing::warn;

use crate::app::Services;
use crate::{Request, Response, Status};

/// Always `200 OK` with body `"ok"`. If the process can answer HTTP at all,
/// it is alive.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"` when every backend answers a ping,
/// `503` otherwise.
pub async fn readiness(services: Services, _req: Request) -> Response {
    match services.ping().await {
        Ok(()) => Response::text("ready"),
        Err(e) => {
            warn!("readiness check failed: {e}");
            Response::builder().status(Status::ServiceUnavailable).text("unavailable")
        }
    }
}
