//! Request bodies accepted by the admin surface.
//!
//! These are the loose shapes clients send. They are validated and turned into
//! [`NewTool`](super::NewTool) / [`ToolPatch`](super::ToolPatch) by the admin service.

use super::tool::normalize_list;
use serde::{Deserialize, Deserializer};

/// A list field given either as comma-separated text or as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Text(String),
    Items(Vec<String>),
}

impl ListInput {
    /// Trimmed, non-empty elements in their original order.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Self::Text(text) => normalize_list(text),
            Self::Items(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl Default for ListInput {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

/// Forms send `null` for a list left blank.
fn null_as_empty<'de, D>(deserializer: D) -> Result<ListInput, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ListInput>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /api/admin/tools`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateToolRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub pricing: String,
    #[serde(default)]
    pub pricing_details: Option<String>,
    #[serde(default)]
    pub website: String,
    /// e.g. "writing, chat, gpt"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: ListInput,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: ListInput,
    #[serde(default)]
    pub published: bool,
}

/// Body of `PATCH /api/admin/tools/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateToolRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub pricing: Option<String>,
    pub pricing_details: Option<String>,
    pub website: Option<String>,
    pub tags: Option<ListInput>,
    pub features: Option<ListInput>,
    pub published: Option<bool>,
}
