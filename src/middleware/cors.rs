//! Cross-origin resource sharing.
//!
//! The catalog is consumed straight from a browser page served on another
//! origin, so every reply carries the allow headers and any `OPTIONS` request
//! is answered directly with `200` and an empty body.

use crate::response::Response;
use crate::status::Status;

/// CORS policy applied by [`Router::cors`](crate::Router::cors).
#[derive(Clone, Debug)]
pub struct Cors {
    allow_origin: String,
    allow_methods: String,
    allow_headers: String,
}

impl Cors {
    /// Any origin; `GET, POST, DELETE, OPTIONS`; `Content-Type`.
    pub fn permissive() -> Self {
        Self {
            allow_origin: "*".to_owned(),
            allow_methods: "GET, POST, DELETE, OPTIONS".to_owned(),
            allow_headers: "Content-Type".to_owned(),
        }
    }

    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allow_origin = origin.into();
        self
    }

    pub(crate) fn preflight(&self) -> Response {
        Response::builder().status(Status::Ok).no_body()
    }

    pub(crate) fn apply(&self, response: &mut Response) {
        response.set_header("access-control-allow-origin", &self.allow_origin);
        response.set_header("access-control-allow-methods", &self.allow_methods);
        response.set_header("access-control-allow-headers", &self.allow_headers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_all_three_headers() {
        let mut res = Response::status(Status::NotFound);
        Cors::permissive().apply(&mut res);
        assert_eq!(res.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(res.header("Access-Control-Allow-Methods"), Some("GET, POST, DELETE, OPTIONS"));
        assert_eq!(res.header("Access-Control-Allow-Headers"), Some("Content-Type"));
    }

    #[test]
    fn origin_can_be_narrowed() {
        let mut res = Response::status(Status::Ok);
        Cors::permissive().allow_origin("http://localhost:5500").apply(&mut res);
        assert_eq!(res.header("access-control-allow-origin"), Some("http://localhost:5500"));
    }
}
