//! JSON file backed catalog store.
//!
//! Reads are served from an in-memory snapshot of the last successful flush.
//! Mutations are serialized: each one holds the write lock across a full
//! read-modify-write cycle of the backing file and only swaps the snapshot
//! once the new file is in place. The file is replaced through a sibling
//! temp file and a rename, so readers never see a half-written catalog.
//!
//! A single writer process is assumed. Another process editing the file
//! concurrently is not detected.

use crate::error::{CatalogError, CatalogResult};
use crate::models::{NewTool, Tool, ToolPatch};
use std::collections::HashSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    snapshot: RwLock<Arc<Vec<Tool>>>,
    /// Held for the duration of every read-modify-write cycle.
    write_lock: Mutex<()>,
}

impl CatalogStore {
    /// Open the store and load the backing file into memory.
    ///
    /// A missing file is an empty catalog; it is created by the first mutation.
    pub async fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let tools = read_catalog(&path).await?;
        info!(path = %path.display(), tools = tools.len(), "Catalog loaded");

        Ok(Self {
            path,
            snapshot: RwLock::new(Arc::new(tools)),
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record, in insertion order, as of the last flush.
    pub async fn load_all(&self) -> Arc<Vec<Tool>> {
        self.snapshot.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.snapshot.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Look up a record regardless of its published state.
    pub async fn get_by_id(&self, id: u64) -> CatalogResult<Tool> {
        self.snapshot
            .read()
            .await
            .iter()
            .find(|tool| tool.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(id))
    }

    /// Append a new record, assigning the next free id.
    pub async fn insert(&self, new_tool: NewTool) -> CatalogResult<Tool> {
        self.mutate(move |tools| {
            let id = next_id(tools)?;
            let tool = new_tool.into_tool(id);
            tools.push(tool.clone());
            Ok(tool)
        })
        .await
    }

    /// Apply a partial update to an existing record.
    pub async fn update(&self, id: u64, patch: ToolPatch) -> CatalogResult<Tool> {
        self.mutate(move |tools| {
            let tool = tools
                .iter_mut()
                .find(|tool| tool.id == id)
                .ok_or_else(|| CatalogError::not_found(id))?;
            patch.apply(tool);
            Ok(tool.clone())
        })
        .await
    }

    /// Permanently remove a record.
    pub async fn delete(&self, id: u64) -> CatalogResult<()> {
        self.mutate(move |tools| {
            let index = tools
                .iter()
                .position(|tool| tool.id == id)
                .ok_or_else(|| CatalogError::not_found(id))?;
            tools.remove(index);
            Ok(())
        })
        .await
    }

    /// Re-read the backing file into the snapshot.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&self) -> CatalogResult<usize> {
        let _guard = self.write_lock.lock().await;
        let tools = read_catalog(&self.path).await?;
        let count = tools.len();
        *self.snapshot.write().await = Arc::new(tools);
        debug!(path = %self.path.display(), tools = count, "Catalog reloaded");
        Ok(count)
    }

    /// Run one read-modify-write cycle under the write lock.
    ///
    /// The file is re-read rather than trusting the snapshot, then rewritten in
    /// full. The snapshot is only replaced after the new file is in place.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Vec<Tool>) -> CatalogResult<T>,
    ) -> CatalogResult<T> {
        let _guard = self.write_lock.lock().await;

        let mut tools = read_catalog(&self.path).await?;
        let output = op(&mut tools)?;
        write_catalog(&self.path, &tools).await?;

        debug!(path = %self.path.display(), tools = tools.len(), "Catalog flushed");
        *self.snapshot.write().await = Arc::new(tools);
        Ok(output)
    }
}

/// `max(id) + 1`, starting at 1 for an empty catalog.
fn next_id(tools: &[Tool]) -> CatalogResult<u64> {
    tools
        .iter()
        .map(|tool| tool.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| CatalogError::storage("Tool id space exhausted"))
}

async fn read_catalog(path: &Path) -> CatalogResult<Vec<Tool>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Catalog file does not exist, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(CatalogError::corrupt_state(
                path.display().to_string(),
                format!("unreadable: {}", e),
            ));
        }
    };

    let tools: Vec<Tool> = serde_json::from_slice(&bytes).map_err(|e| {
        CatalogError::corrupt_state(path.display().to_string(), format!("malformed JSON: {}", e))
    })?;

    let mut seen = HashSet::with_capacity(tools.len());
    for tool in &tools {
        if !seen.insert(tool.id) {
            return Err(CatalogError::corrupt_state(
                path.display().to_string(),
                format!("duplicate tool id {}", tool.id),
            ));
        }
    }

    Ok(tools)
}

async fn write_catalog(path: &Path, tools: &[Tool]) -> CatalogResult<()> {
    let json = serde_json::to_vec_pretty(tools)
        .map_err(|e| CatalogError::internal(format!("Failed to serialize catalog: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    // Never write directly to the catalog file
    let temp_path = temp_path_for(path);
    if let Err(e) = write_then_rename(&temp_path, path, &json).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(CatalogError::storage(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }
    Ok(())
}

async fn write_then_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(temp_path, contents).await?;
    tokio::fs::rename(temp_path, path).await
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("catalog"));
    file_name.push(".tmp");
    path.with_file_name(file_name)
}
