//! Catalog operations.
//!
//! This module contains the logic behind every endpoint:
//! - Public search, lookup and category listing
//! - Side-by-side comparison of up to three tools
//! - Administrative create, update, publish and delete

pub mod admin;
pub mod compare;
pub mod query;

pub use admin::AdminService;
pub use compare::{MAX_COMPARE_IDS, compare, parse_ids};
pub use query::{categories, find_published, search};
