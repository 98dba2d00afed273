//! Character records and submission validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored character. `id` is assigned by the server and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub image: String,
}

/// A character as submitted by a client, before the server assigns an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    pub species: String,
    pub status: String,
    pub image: String,
}

impl NewCharacter {
    pub fn with_id(self, id: u64) -> Character {
        Character {
            id,
            name: self.name,
            status: self.status,
            species: self.species,
            image: self.image,
        }
    }
}

/// Fields every submission must carry as strings, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "species", "status", "image"];

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid data")]
    NotAnObject,

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid type for field: {0}")]
    WrongType(&'static str),
}

/// Checks a submitted JSON value and extracts the canonical fields.
///
/// Reports the first failing field only. Values are not inspected beyond
/// their JSON type: any string is an acceptable status or image. Unknown keys,
/// including a client-supplied `id`, are dropped.
pub fn validate(value: &Value) -> Result<NewCharacter, ValidationError> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    let mut fields = [""; 4];
    for (slot, field) in fields.iter_mut().zip(REQUIRED_FIELDS) {
        *slot = match object.get(field) {
            None => return Err(ValidationError::MissingField(field)),
            Some(Value::String(s)) => s.as_str(),
            Some(_) => return Err(ValidationError::WrongType(field)),
        };
    }

    let [name, species, status, image] = fields;
    Ok(NewCharacter {
        name: name.to_owned(),
        species: species.to_owned(),
        status: status.to_owned(),
        image: image.to_owned(),
    })
}
