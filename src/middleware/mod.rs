//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every request regardless of route:
//!
//! - [`cors`]: answers `OPTIONS` preflights and stamps CORS headers on replies
//! - [`trace`]: per-request span with method, path, status, latency

pub mod cors;
pub mod trace;
