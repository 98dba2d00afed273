//! # charstore
//!
//! A tiny catalog of fictional characters: a REST server that keeps the whole
//! collection in one JSON file, and a client that pages through it.
//!
//! ## The contract
//!
//! The file is the database. Every request loads it completely; every
//! mutation rewrites it completely. There is no index, no cache, and no
//! partial write. What the server does on top of that:
//!
//! - Filtering: `status` by case-insensitive equality, `name` by
//!   case-insensitive substring
//! - Pagination: five records per page, `pages` never below 1
//! - Validation: `name`, `species`, `status`, `image` must all be strings
//! - CORS: any origin may call it from a browser
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use charstore::api::{self, App};
//! use charstore::middleware::cors::Cors;
//! use charstore::store::JsonFileStore;
//! use charstore::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), charstore::Error> {
//!     let app = App::new(JsonFileStore::new("db.json"));
//!     let router = api::router(app, Cors::permissive());
//!
//!     Server::bind("0.0.0.0:3000".parse().unwrap())
//!         .await?
//!         .serve(router)
//!         .await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod client;
pub mod config;
pub mod health;
pub mod middleware;
pub mod model;
pub mod query;
pub mod store;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
