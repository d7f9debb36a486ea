//! Stamp command - Increment the build number and refresh the build date

use anyhow::{Context, Result};
use chrono::Local;
use owo_colors::OwoColorize;
use std::path::Path;

use crate::record::{self, FileStore};

/// Stamp the record at `path` and return the resulting version string
///
/// The record is re-read after saving so the returned string reflects what
/// is actually on disk. With `dry_run` nothing is written.
pub fn execute(path: &Path, dry_run: bool) -> Result<String> {
    let store = FileStore::new(path);

    if dry_run {
        let mut doc = store
            .load_or_default()
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        let stamp = record::stamp(&mut doc, Local::now().date_naive())
            .with_context(|| format!("Cannot stamp: {}", path.display()))?;
        eprintln!(
            "{} build {} ({}) for {}",
            "Would stamp:".blue(),
            stamp.build_number,
            stamp.build_date,
            path.display()
        );
        return Ok(record::format_version(&doc));
    }

    let stamp = record::stamp_build(&store)
        .with_context(|| format!("Cannot stamp: {}", path.display()))?;
    log::info!(
        "stamped {} with build {}",
        store.path().display(),
        stamp.build_number
    );
    let previous = stamp
        .previous
        .map_or_else(|| "(none)".to_string(), |n| n.to_string());
    eprintln!(
        "{} build {} -> {} ({})",
        "Stamped:".green(),
        previous,
        stamp.build_number,
        stamp.build_date
    );

    let doc = store
        .load()
        .with_context(|| format!("Failed to re-read: {}", path.display()))?;
    Ok(record::format_version(&doc))
}
