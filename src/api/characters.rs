//! `/api/character` handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ApiError, ApiResult, Message};
use super::App;
use crate::model::{validate, Character};
use crate::query::{paginate, CharacterPage, ListQuery};
use crate::request::Request;
use crate::response::Json;
use crate::status::Status;

/// Largest batch `POST /api/character/init` accepts.
pub const INIT_LIMIT: usize = 20;

/// Body of a successful bulk-init.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitReply {
    pub message: String,
    pub characters: Vec<Character>,
}

// GET /api/character?name=&status=&page=
pub async fn list(req: Request, app: App) -> ApiResult<Json<CharacterPage>> {
    let query = ListQuery::from_request(&req);
    let collection = app.store().list().await?;
    Ok(Json(paginate(collection, &query)))
}

// GET /api/character/{id}
pub async fn get(req: Request, app: App) -> ApiResult<Json<Character>> {
    let id = path_id(&req)?;
    let character = app.store().get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(character))
}

// POST /api/character
pub async fn create(req: Request, app: App) -> ApiResult<(Status, Json<Character>)> {
    let body: Value = req.json().map_err(|_| ApiError::InvalidBody)?;
    let new = validate(&body)?;
    let character = app.store().create(new).await?;
    tracing::info!(id = character.id, name = %character.name, "character created");
    Ok((Status::Created, Json(character)))
}

// DELETE /api/character/{id}
pub async fn delete(req: Request, app: App) -> ApiResult<Json<Message>> {
    let id = path_id(&req)?;
    if !app.store().delete(id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "character deleted");
    Ok(Json(Message::new(format!("Character {id} deleted"))))
}

// POST /api/character/init
pub async fn init(req: Request, app: App) -> ApiResult<(Status, Json<InitReply>)> {
    let body: Value = req.json().map_err(|_| ApiError::InvalidBody)?;
    let entries = match body {
        Value::Array(entries) if entries.len() <= INIT_LIMIT => entries,
        _ => return Err(ApiError::InvalidInit { max: INIT_LIMIT }),
    };

    let records = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| validate(entry).map_err(|source| ApiError::InvalidRecord { index, source }))
        .collect::<Result<Vec<_>, _>>()?;

    let characters = app.store().replace_all(records).await?;
    tracing::info!(count = characters.len(), "collection initialized");
    Ok((
        Status::Created,
        Json(InitReply {
            message: "Data initialized successfully".to_owned(),
            characters,
        }),
    ))
}

/// Ids are unsigned base-10 integers; any other segment is treated as an
/// unknown route rather than a bad id.
fn path_id(req: &Request) -> ApiResult<u64> {
    req.param("id")
        .filter(|raw| !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|raw| raw.parse().ok())
        .ok_or(ApiError::RouteNotFound)
}
