//! Tool record and the shapes derived from it.

use serde::{Deserialize, Serialize};

/// A catalog entry describing an external product or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Assigned by the store, never changes after creation.
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub pricing: String,
    #[serde(default)]
    pub pricing_details: String,
    pub website: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    /// Only published tools are visible on the public query path.
    #[serde(default)]
    pub published: bool,
}

/// A validated tool that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTool {
    pub name: String,
    pub description: String,
    pub category: String,
    pub pricing: String,
    pub pricing_details: String,
    pub website: String,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub published: bool,
}

impl NewTool {
    /// Attach the store-assigned id.
    pub fn into_tool(self, id: u64) -> Tool {
        Tool {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            pricing: self.pricing,
            pricing_details: self.pricing_details,
            website: self.website,
            tags: self.tags,
            features: self.features,
            published: self.published,
        }
    }
}

/// Validated partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub pricing: Option<String>,
    pub pricing_details: Option<String>,
    pub website: Option<String>,
    pub tags: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub published: Option<bool>,
}

impl ToolPatch {
    /// Patch that only toggles the published flag.
    pub fn published(published: bool) -> Self {
        Self {
            published: Some(published),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the present fields to `tool` in place. The id is never touched.
    pub fn apply(self, tool: &mut Tool) {
        if let Some(name) = self.name {
            tool.name = name;
        }
        if let Some(description) = self.description {
            tool.description = description;
        }
        if let Some(category) = self.category {
            tool.category = category;
        }
        if let Some(pricing) = self.pricing {
            tool.pricing = pricing;
        }
        if let Some(pricing_details) = self.pricing_details {
            tool.pricing_details = pricing_details;
        }
        if let Some(website) = self.website {
            tool.website = website;
        }
        if let Some(tags) = self.tags {
            tool.tags = tags;
        }
        if let Some(features) = self.features {
            tool.features = features;
        }
        if let Some(published) = self.published {
            tool.published = published;
        }
    }
}

/// Public search filter, deserialized straight from the query string.
///
/// All present fields are combined with AND. Blank values impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolFilter {
    /// Substring of name, description or any tag.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub pricing: Option<String>,
}

impl ToolFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_pricing(mut self, pricing: impl Into<String>) -> Self {
        self.pricing = Some(pricing.into());
        self
    }
}

/// Split free text on commas into trimmed, non-empty elements.
///
/// Order and duplicates are preserved.
pub fn normalize_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tool {
        NewTool {
            name: "Copilot".to_string(),
            description: "Pair programmer".to_string(),
            category: "Coding".to_string(),
            pricing: "Paid".to_string(),
            pricing_details: String::new(),
            website: "https://example.com".to_string(),
            tags: vec!["ai".to_string()],
            features: vec![],
            published: false,
        }
        .into_tool(7)
    }

    #[test]
    fn test_normalize_list() {
        assert_eq!(normalize_list("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(normalize_list(" , ,"), Vec::<String>::new());
        assert_eq!(normalize_list("x,,x"), vec!["x", "x"]);
        assert!(normalize_list("").is_empty());
    }

    #[test]
    fn test_patch_keeps_id_and_absent_fields() {
        let mut tool = sample();
        let patch = ToolPatch {
            name: Some("Copilot X".to_string()),
            published: Some(true),
            ..ToolPatch::default()
        };
        patch.apply(&mut tool);
        assert_eq!(tool.id, 7);
        assert_eq!(tool.name, "Copilot X");
        assert_eq!(tool.category, "Coding");
        assert!(tool.published);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ToolPatch::default().is_empty());
        assert!(!ToolPatch::published(false).is_empty());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = serde_json::json!({
            "id": 1,
            "name": "n",
            "description": "d",
            "category": "c",
            "pricing": "Free",
            "website": "https://x.io"
        });
        let tool: Tool = serde_json::from_value(json).unwrap();
        assert!(tool.tags.is_empty());
        assert!(tool.features.is_empty());
        assert!(tool.pricing_details.is_empty());
        assert!(!tool.published);
    }
}
