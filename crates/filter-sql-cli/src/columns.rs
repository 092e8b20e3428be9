//! Loading the column map from disk.

use std::path::Path;

use anyhow::Context;
use filter_sql_core::ColumnMap;
use tracing::{debug, info};

/// Reads a JSON object of `identifier -> SQL column` pairs.
///
/// With no path, every identifier falls back to humanized quoting.
pub fn load(path: Option<&Path>) -> anyhow::Result<ColumnMap> {
    let Some(path) = path else {
        debug!("no column map given, using an empty one");
        return Ok(ColumnMap::new());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read column map {}", path.display()))?;
    let columns: ColumnMap = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid column map {}", path.display()))?;

    info!("Loaded {} column mappings from {}", columns.len(), path.display());
    Ok(columns)
}
