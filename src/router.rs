//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. Preflight answering and CORS headers are applied here so
//! that every reply, including the fallback, carries them.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::cors::Cors;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup with the shared state `S`; pass it to
/// [`Server::serve`](crate::Server::serve). Each [`Router::on`] call returns
/// `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    fallback: Option<fn() -> Response>,
    rejection: Option<fn() -> Response>,
    cors: Option<Cors>,
    state: S,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), fallback: None, rejection: None, cors: None, state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    /// Static segments win over parameters, so `/api/character/init` and
    /// `/api/character/{id}` can coexist.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Reply used when no route matches. Defaults to a bare `404`.
    pub fn fallback(mut self, reply: fn() -> Response) -> Self {
        self.fallback = Some(reply);
        self
    }

    /// Reply used when the request body cannot be read. Defaults to a bare
    /// `400`.
    pub fn rejection(mut self, reply: fn() -> Response) -> Self {
        self.rejection = Some(reply);
        self
    }

    /// Attach CORS headers to every response and answer `OPTIONS` preflights.
    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = Some(cors);
        self
    }

    pub fn state(&self) -> &S { &self.state }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request and produces one response.
    pub async fn handle(&self, req: Request) -> Response {
        let response = match (&self.cors, req.method()) {
            (Some(cors), Method::Options) => cors.preflight(),
            _ => self.dispatch(req).await,
        };
        self.with_cors(response)
    }

    /// Fallback reply with CORS applied, for requests the server could not
    /// even turn into a [`Request`] (unknown method strings).
    pub fn unroutable(&self) -> Response {
        self.with_cors(self.not_found())
    }

    /// Rejection reply with CORS applied, for requests whose body could not
    /// be collected.
    pub fn unreadable(&self) -> Response {
        let response = match self.rejection {
            Some(reply) => reply(),
            None => Response::status(Status::BadRequest),
        };
        self.with_cors(response)
    }

    fn with_cors(&self, mut response: Response) -> Response {
        if let Some(cors) = &self.cors {
            cors.apply(&mut response);
        }
        response
    }

    async fn dispatch(&self, req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => handler.call(req.with_params(params), self.state.clone()).await,
            None => self.not_found(),
        }
    }

    fn not_found(&self) -> Response {
        match self.fallback {
            Some(reply) => reply(),
            None => Response::status(Status::NotFound),
        }
    }
}
