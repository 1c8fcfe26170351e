//! Persistence layer.
//!
//! The whole catalog lives in one JSON file that is loaded into memory and
//! rewritten on every mutation.

pub mod catalog;

pub use catalog::CatalogStore;
