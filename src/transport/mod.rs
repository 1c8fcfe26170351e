//! HTTP surface of the catalog.
//!
//! - `routes`: axum handlers for the public and admin JSON endpoints
//! - `http`: listener, middleware layers and graceful shutdown

pub mod http;
pub mod routes;

pub use http::HttpTransport;
pub use routes::{AppState, router};
