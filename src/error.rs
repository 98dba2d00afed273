//! Unified infrastructure error type.

/// The error type returned by charstore's fallible infrastructure operations.
///
/// Application-level errors (400, 404, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values built from
/// [`ApiError`](crate::api::ApiError), not as `Error`s. This type surfaces
/// failures around the API: binding a port, reading configuration, or a
/// client round trip that did not produce a usable reply.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),

    #[error("http: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status and a `{ message }` body.
    #[error("server replied {status}: {message}")]
    Api { status: u16, message: String },
}
