//! Tool Catalog Library
//!
//! A small catalog of curated tools backed by a JSON file, with public
//! search/compare endpoints and an administrative write path.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod transport;

pub use config::Config;
pub use error::{CatalogError, CatalogResult};
pub use store::CatalogStore;
