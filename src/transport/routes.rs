//! Route table and request handlers.
//!
//! Handlers only parse the request and render the result. Filtering, lookup
//! and validation live in [`crate::services`].

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateToolRequest, Tool, ToolFilter, UpdateToolRequest};
use crate::services::{self, AdminService};
use crate::store::CatalogStore;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<CatalogStore>,
    admin: Arc<AdminService>,
}

impl AppState {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        let admin = Arc::new(AdminService::new(store.clone()));
        Self { store, admin }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }
}

/// Build the router for every catalog endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/compare", get(compare_tools))
        .route("/api/tools/{id}", get(get_tool))
        .route("/api/categories", get(list_categories))
        .route("/api/admin/tools", get(admin_list_tools).post(admin_create_tool))
        .route(
            "/api/admin/tools/{id}",
            patch(admin_update_tool).delete(admin_delete_tool),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CompareQuery {
    ids: Option<String>,
}

fn parse_path_id(raw: &str) -> CatalogResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::invalid_request(format!("Invalid tool id: '{}'", raw)))
}

fn query_error(rejection: QueryRejection) -> CatalogError {
    CatalogError::invalid_request(rejection.body_text())
}

fn body_error(rejection: JsonRejection) -> CatalogError {
    CatalogError::invalid_request(rejection.body_text())
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "tools": state.store.len().await }))
}

async fn list_tools(
    State(state): State<AppState>,
    filter: Result<Query<ToolFilter>, QueryRejection>,
) -> CatalogResult<Json<Vec<Tool>>> {
    let Query(filter) = filter.map_err(query_error)?;
    let tools = state.store.load_all().await;
    let found = services::search(&tools, &filter);
    debug!(
        search = ?filter.search,
        category = ?filter.category,
        pricing = ?filter.pricing,
        matched = found.len(),
        "Search"
    );
    Ok(Json(found))
}

async fn get_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Json<Tool>> {
    let id = parse_path_id(&id)?;
    let tools = state.store.load_all().await;
    services::find_published(&tools, id).map(Json)
}

async fn compare_tools(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> CatalogResult<Json<Vec<Tool>>> {
    let Query(query) = query.map_err(query_error)?;
    let raw = query
        .ids
        .ok_or_else(|| CatalogError::invalid_request("Query parameter 'ids' is required"))?;
    let ids = services::parse_ids(&raw)?;
    let tools = state.store.load_all().await;
    services::compare(&tools, &ids).map(Json)
}

async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    let tools = state.store.load_all().await;
    Json(services::categories(&tools))
}

async fn admin_list_tools(State(state): State<AppState>) -> Json<Vec<Tool>> {
    Json(state.admin.list_all().await.to_vec())
}

async fn admin_create_tool(
    State(state): State<AppState>,
    body: Result<Json<CreateToolRequest>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<Tool>)> {
    let Json(request) = body.map_err(body_error)?;
    let tool = state.admin.create(request).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

async fn admin_update_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateToolRequest>, JsonRejection>,
) -> CatalogResult<Json<Tool>> {
    let id = parse_path_id(&id)?;
    let Json(request) = body.map_err(body_error)?;

    // A bare visibility toggle goes through the dedicated operation.
    let tool = match request {
        UpdateToolRequest {
            published: Some(published),
            name: None,
            description: None,
            category: None,
            pricing: None,
            pricing_details: None,
            website: None,
            tags: None,
            features: None,
        } => state.admin.set_published(id, published).await?,
        request => state.admin.update(id, request).await?,
    };
    Ok(Json(tool))
}

async fn admin_delete_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<StatusCode> {
    let id = parse_path_id(&id)?;
    state.admin.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
