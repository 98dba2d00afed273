use serde::{Deserialize, Serialize};

use crate::model::ValidationError;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;
use crate::store::StoreError;

/// Body of every error reply, and of plain confirmations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Everything a handler can fail with, mapped onto a status and `{ message }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// One entry of a bulk-init batch failed validation.
    #[error("Record {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// The body was not JSON at all.
    #[error("Invalid data")]
    InvalidBody,

    #[error("Invalid init data. Expected an array of up to {max} elements.")]
    InvalidInit { max: usize },

    #[error("Character not found")]
    NotFound,

    #[error("Route not found")]
    RouteNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::Validation(_)
            | Self::InvalidRecord { .. }
            | Self::InvalidBody
            | Self::InvalidInit { .. } => Status::BadRequest,
            Self::NotFound | Self::RouteNotFound => Status::NotFound,
            Self::Store(_) => Status::InternalServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Store(e) => {
                tracing::error!(error = %e, "storage failure");
                "Server error".to_owned()
            }
            other => other.to_string(),
        };
        (self.status(), Json(Message { message })).into_response()
    }
}
