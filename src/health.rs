//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Has the store finished initializing? |

use serde_json::json;

use crate::api::App;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;
use crate::store::StoreState;

/// Always `200 OK`. If the process can answer HTTP at all, it is alive.
pub async fn liveness(_req: Request, _app: App) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `200 OK` once the store is Ready, `503` while initialization keeps failing.
///
/// An uninitialized store gets one initialization attempt per probe, so a
/// repaired database file turns the pod ready without a restart.
pub async fn readiness(_req: Request, app: App) -> Response {
    if app.store().state() == StoreState::Uninitialized {
        if let Err(e) = app.store().ready().await {
            tracing::warn!(error = %e, "store not ready");
            return (Status::ServiceUnavailable, Json(json!({ "status": "unavailable" }))).into_response();
        }
    }
    Json(json!({ "status": "ready" })).into_response()
}
