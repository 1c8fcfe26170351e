//! Administrative write path.
//!
//! Requests are validated here, before the store is touched. No identity checks
//! are made at this layer; access control belongs in front of the HTTP surface.

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateToolRequest, NewTool, Tool, ToolPatch, UpdateToolRequest};
use crate::store::CatalogStore;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

pub struct AdminService {
    store: Arc<CatalogStore>,
}

impl AdminService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Every tool, drafts included.
    pub async fn list_all(&self) -> Arc<Vec<Tool>> {
        self.store.load_all().await
    }

    pub async fn create(&self, request: CreateToolRequest) -> CatalogResult<Tool> {
        let new_tool = validate_create(request).inspect_err(|e| {
            warn!(error = %e, "Rejected tool creation");
        })?;

        let tool = self.store.insert(new_tool).await?;
        info!(
            id = tool.id,
            name = %tool.name,
            published = tool.published,
            "Tool created"
        );
        Ok(tool)
    }

    pub async fn set_published(&self, id: u64, published: bool) -> CatalogResult<Tool> {
        let tool = self.store.update(id, ToolPatch::published(published)).await?;
        info!(id, published, "Tool visibility changed");
        Ok(tool)
    }

    /// Edit any subset of fields. Present fields are validated like on create.
    pub async fn update(&self, id: u64, request: UpdateToolRequest) -> CatalogResult<Tool> {
        let patch = validate_update(request).inspect_err(|e| {
            warn!(id, error = %e, "Rejected tool update");
        })?;

        let tool = self.store.update(id, patch).await?;
        info!(id, published = tool.published, "Tool updated");
        Ok(tool)
    }

    pub async fn delete(&self, id: u64) -> CatalogResult<()> {
        self.store.delete(id).await?;
        info!(id, "Tool deleted");
        Ok(())
    }
}

fn validate_create(request: CreateToolRequest) -> CatalogResult<NewTool> {
    Ok(NewTool {
        name: required("name", &request.name)?,
        description: required("description", &request.description)?,
        category: required("category", &request.category)?,
        pricing: required("pricing", &request.pricing)?,
        pricing_details: request
            .pricing_details
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        website: website(&request.website)?,
        tags: request.tags.normalize(),
        features: request.features.normalize(),
        published: request.published,
    })
}

fn validate_update(request: UpdateToolRequest) -> CatalogResult<ToolPatch> {
    let patch = ToolPatch {
        name: request.name.as_deref().map(|v| required("name", v)).transpose()?,
        description: request
            .description
            .as_deref()
            .map(|v| required("description", v))
            .transpose()?,
        category: request
            .category
            .as_deref()
            .map(|v| required("category", v))
            .transpose()?,
        pricing: request
            .pricing
            .as_deref()
            .map(|v| required("pricing", v))
            .transpose()?,
        pricing_details: request.pricing_details.map(|v| v.trim().to_string()),
        website: request.website.as_deref().map(website).transpose()?,
        tags: request.tags.map(|v| v.normalize()),
        features: request.features.map(|v| v.normalize()),
        published: request.published,
    };

    if patch.is_empty() {
        return Err(CatalogError::invalid_request("No fields to update"));
    }
    Ok(patch)
}

/// Trimmed value of a required text field.
fn required(field: &str, value: &str) -> CatalogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::invalid_request(format!(
            "Field '{}' must not be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Absolute http(s) URL.
fn website(value: &str) -> CatalogResult<String> {
    let trimmed = required("website", value)?;
    let url = Url::parse(&trimmed).map_err(|e| {
        CatalogError::invalid_request(format!("Field 'website' is not a valid URL: {}", e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CatalogError::invalid_request(format!(
            "Field 'website' must use http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListInput;

    fn request() -> CreateToolRequest {
        CreateToolRequest {
            name: "  Notion AI ".to_string(),
            description: "Writing assistant".to_string(),
            category: "Writing".to_string(),
            pricing: "Paid".to_string(),
            pricing_details: None,
            website: "https://notion.so".to_string(),
            tags: ListInput::Text("a, b ,c".to_string()),
            features: ListInput::Text(" , ".to_string()),
            published: false,
        }
    }

    #[test]
    fn test_validate_create_trims_and_normalizes() {
        let tool = validate_create(request()).unwrap();
        assert_eq!(tool.name, "Notion AI");
        assert_eq!(tool.tags, vec!["a", "b", "c"]);
        assert!(tool.features.is_empty());
        assert_eq!(tool.pricing_details, "");
    }

    #[test]
    fn test_validate_create_rejects_blank_required() {
        let mut req = request();
        req.category = "   ".to_string();
        let err = validate_create(req).unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_website_requires_http_scheme() {
        assert!(website("https://example.com").is_ok());
        assert!(website("ftp://example.com").is_err());
        assert!(website("example.com").is_err());
    }

    #[test]
    fn test_validate_update_rejects_empty_patch() {
        let err = validate_update(UpdateToolRequest::default()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest { .. }));
    }

    #[test]
    fn test_validate_update_only_present_fields() {
        let patch = validate_update(UpdateToolRequest {
            published: Some(true),
            tags: Some(ListInput::Text("x,,y".to_string())),
            ..UpdateToolRequest::default()
        })
        .unwrap();
        assert_eq!(patch.published, Some(true));
        assert_eq!(patch.tags, Some(vec!["x".to_string(), "y".to_string()]));
        assert!(patch.name.is_none());
    }
}
