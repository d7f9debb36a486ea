//! Version command - Print the dotted version string

use anyhow::{Context, Result};
use std::path::Path;

use crate::record::{self, FileStore};

/// Read the record at `path` and format its version
pub fn execute(path: &Path) -> Result<String> {
    let doc = FileStore::new(path)
        .load()
        .with_context(|| format!("Failed to read version record: {}", path.display()))?;
    Ok(record::format_version(&doc))
}
