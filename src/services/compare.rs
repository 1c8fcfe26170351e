//! Side-by-side comparison of published tools.

use crate::error::{CatalogError, CatalogResult};
use crate::models::Tool;
use std::collections::HashSet;

/// Upper bound on the number of tools compared at once.
pub const MAX_COMPARE_IDS: usize = 3;

/// Parse a comma-separated id list such as `"3, 1,2"`.
///
/// Blank input, entries that are not unsigned integers and repeated ids are
/// all `InvalidRequest`.
pub fn parse_ids(raw: &str) -> CatalogResult<Vec<u64>> {
    if raw.trim().is_empty() {
        return Err(CatalogError::invalid_request(
            "At least one tool id is required",
        ));
    }

    let ids = raw
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u64>().map_err(|_| {
                CatalogError::invalid_request(format!("Invalid tool id: '{}'", part))
            })
        })
        .collect::<CatalogResult<Vec<u64>>>()?;

    ensure_distinct(&ids)?;
    Ok(ids)
}

fn ensure_distinct(ids: &[u64]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    match ids.iter().find(|id| !seen.insert(**id)) {
        Some(dup) => Err(CatalogError::invalid_request(format!(
            "Tool id {} is listed more than once",
            dup
        ))),
        None => Ok(()),
    }
}

/// Resolve `ids` to published tools, in the order they were requested.
///
/// Fails with `InvalidRequest` for an empty, oversized or repeating id list
/// and with `NotFound` naming every id that does not resolve.
pub fn compare(tools: &[Tool], ids: &[u64]) -> CatalogResult<Vec<Tool>> {
    if ids.is_empty() {
        return Err(CatalogError::invalid_request(
            "At least one tool id is required",
        ));
    }
    if ids.len() > MAX_COMPARE_IDS {
        return Err(CatalogError::invalid_request(format!(
            "Maximum {} tools can be compared, got {}",
            MAX_COMPARE_IDS,
            ids.len()
        )));
    }

    ensure_distinct(ids)?;

    let mut found = Vec::with_capacity(ids.len());
    let mut missing = Vec::new();
    for &id in ids {
        match tools.iter().find(|tool| tool.id == id && tool.published) {
            Some(tool) => found.push(tool.clone()),
            None => missing.push(id),
        }
    }

    if !missing.is_empty() {
        return Err(CatalogError::not_found_many(missing));
    }
    Ok(found)
}
