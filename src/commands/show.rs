//! Show command - Display the version record

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::path::Path;

use crate::record::{self, FileStore, VersionInfo};

/// Everything `show` reports about a record
#[derive(Debug, Serialize)]
pub struct Report {
    /// Path of the record file
    pub path: String,
    /// Dotted version string as the packaging step sees it
    pub version: String,
    #[serde(flatten)]
    pub info: VersionInfo,
}

/// Load the record at `path` and collect its report
pub fn report(path: &Path) -> Result<Report> {
    let doc = FileStore::new(path)
        .load()
        .with_context(|| format!("Failed to read version record: {}", path.display()))?;

    Ok(Report {
        path: path.display().to_string(),
        version: record::format_version(&doc),
        info: VersionInfo::from_document(&doc),
    })
}

/// Execute the show command and return formatted output
pub fn execute(path: &Path, json: bool) -> Result<String> {
    let report = report(path)?;

    if json {
        return serde_json::to_string_pretty(&report).context("Failed to serialize report");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("Field"), Cell::new("Value")]);

    let info = &report.info;
    let rows = [
        ("Record", report.path.clone()),
        ("Version", report.version.clone()),
        ("Major", info.major.to_string()),
        ("Minor", info.minor.to_string()),
        ("Revision", info.revision.to_string()),
        ("Build number", info.build_number.to_string()),
        (
            "Build date",
            info.build_date.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }

    Ok(table.to_string())
}
