//! Public query path: search, single lookup and category listing.
//!
//! Draft tools are filtered out here. Callers never need to check `published`.

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Tool, ToolFilter};
use std::collections::BTreeSet;

/// Lower-cased, blank-free form of a [`ToolFilter`].
#[derive(Debug, Default)]
struct Predicate {
    search: Option<String>,
    category: Option<String>,
    pricing: Option<String>,
}

impl Predicate {
    fn new(filter: &ToolFilter) -> Self {
        fn prepare(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_lowercase)
        }

        Self {
            search: prepare(&filter.search),
            category: prepare(&filter.category),
            pricing: prepare(&filter.pricing),
        }
    }

    fn matches(&self, tool: &Tool) -> bool {
        if let Some(needle) = &self.search {
            let hit = tool.name.to_lowercase().contains(needle)
                || tool.description.to_lowercase().contains(needle)
                || tool.tags.iter().any(|tag| tag.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if tool.category.to_lowercase() != *category {
                return false;
            }
        }
        if let Some(pricing) = &self.pricing {
            if tool.pricing.to_lowercase() != *pricing {
                return false;
            }
        }
        true
    }
}

/// Published tools matching every present filter field, in collection order.
pub fn search(tools: &[Tool], filter: &ToolFilter) -> Vec<Tool> {
    let predicate = Predicate::new(filter);
    tools
        .iter()
        .filter(|tool| tool.published && predicate.matches(tool))
        .cloned()
        .collect()
}

/// A published tool by id. Drafts are reported as not found.
pub fn find_published(tools: &[Tool], id: u64) -> CatalogResult<Tool> {
    tools
        .iter()
        .find(|tool| tool.id == id && tool.published)
        .cloned()
        .ok_or_else(|| CatalogError::not_found(id))
}

/// Distinct categories of published tools, sorted.
pub fn categories(tools: &[Tool]) -> Vec<String> {
    tools
        .iter()
        .filter(|tool| tool.published)
        .map(|tool| tool.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
