//! The catalog HTTP API.
//!
//! | Method | Path | Reply |
//! |---|---|---|
//! | `GET` | `/api/character?name=&status=&page=` | `200 { info: { pages }, results }` |
//! | `GET` | `/api/character/{id}` | `200 Character` / `404` |
//! | `POST` | `/api/character` | `201 Character` / `400` |
//! | `DELETE` | `/api/character/{id}` | `200 { message }` / `404` |
//! | `POST` | `/api/character/init` | `201 { message, characters }` / `400` |
//! | `OPTIONS` | any | `200`, CORS preflight |
//! | `GET` | `/healthz`, `/readyz` | liveness / store readiness |

mod characters;
mod error;

use std::sync::Arc;

use crate::health;
use crate::method::Method;
use crate::middleware::cors::Cors;
use crate::response::IntoResponse;
use crate::router::Router;
use crate::store::CharacterStore;

pub use characters::{InitReply, INIT_LIMIT};
pub use error::{ApiError, ApiResult, Message};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct App {
    store: Arc<dyn CharacterStore>,
}

impl App {
    pub fn new(store: impl CharacterStore) -> Self {
        Self { store: Arc::new(store) }
    }

    pub fn store(&self) -> &dyn CharacterStore {
        self.store.as_ref()
    }
}

/// All routes, with `cors` applied to every reply.
pub fn router(app: App, cors: Cors) -> Router<App> {
    Router::new(app)
        .on(Method::Get,    "/api/character",      characters::list)
        .on(Method::Post,   "/api/character",      characters::create)
        .on(Method::Post,   "/api/character/init", characters::init)
        .on(Method::Get,    "/api/character/{id}", characters::get)
        .on(Method::Delete, "/api/character/{id}", characters::delete)
        .on(Method::Get,    "/healthz",            health::liveness)
        .on(Method::Get,    "/readyz",             health::readiness)
        .fallback(|| ApiError::RouteNotFound.into_response())
        .rejection(|| ApiError::InvalidBody.into_response())
        .cors(cors)
}

#[cfg(test)]
mod tests;
