//! Data models for the tool catalog.
//!
//! This module re-exports all model types used throughout the application.

pub mod request;
pub mod tool;

// Re-export commonly used types
pub use request::{CreateToolRequest, ListInput, UpdateToolRequest};
pub use tool::{NewTool, Tool, ToolFilter, ToolPatch, normalize_list};
