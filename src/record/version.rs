//! Build stamping and version formatting
//!
//! Everything here works on an in-memory [`PropertiesDocument`]; loading and
//! saving belongs to [`super::store`].

use chrono::NaiveDate;
use serde::Serialize;

use super::properties::PropertiesDocument;
use crate::config;
use crate::error::RecordError;

pub const BUILD_VERSION_MAJOR_KEY: &str = "build.version.major";
pub const BUILD_VERSION_MINOR_KEY: &str = "build.version.minor";
pub const BUILD_VERSION_REVISION_KEY: &str = "build.version.revision";
pub const BUILD_NUMBER_KEY: &str = "build.number";
pub const BUILD_DATE_KEY: &str = "build.date";

/// Value assumed for `build.number` when the key is absent
pub const DEFAULT_BUILD_NUMBER: i64 = 1;

/// Rendered in place of a missing version component
pub const MISSING_PLACEHOLDER: &str = "null";

/// Result of a single stamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// Build number before stamping, `None` if the key was absent
    pub previous: Option<i64>,
    /// Build number written by this stamp
    pub build_number: i64,
    /// Date text written to `build.date`
    pub build_date: String,
}

/// Format a date the way `build.date` stores it, e.g. "April 5, 2024"
pub fn format_build_date(date: NaiveDate) -> String {
    date.format(config::BUILD_DATE_PATTERN).to_string()
}

/// Increment `build.number` and refresh `build.date`
///
/// An absent (or blank) build number counts as [`DEFAULT_BUILD_NUMBER`], so
/// the first stamp of a fresh record writes `2`. A value that is not an
/// integer leaves the document untouched.
pub fn stamp(doc: &mut PropertiesDocument, today: NaiveDate) -> Result<Stamp, RecordError> {
    let previous = read_build_number(doc)?;
    let current = previous.unwrap_or(DEFAULT_BUILD_NUMBER);
    let build_number = current
        .checked_add(1)
        .ok_or(RecordError::BuildNumberOverflow { value: current })?;
    let build_date = format_build_date(today);

    doc.set(BUILD_NUMBER_KEY, build_number.to_string());
    doc.set(BUILD_DATE_KEY, build_date.clone());

    log::debug!(
        "build.number {} -> {}, build.date = {}",
        previous.map_or_else(|| "(absent)".to_string(), |n| n.to_string()),
        build_number,
        build_date
    );

    Ok(Stamp {
        previous,
        build_number,
        build_date,
    })
}

fn read_build_number(doc: &PropertiesDocument) -> Result<Option<i64>, RecordError> {
    let Some(raw) = doc.get(BUILD_NUMBER_KEY) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| RecordError::InvalidBuildNumber {
            value: raw.to_string(),
        })
}

/// Join major, minor, revision and build number with `.`
///
/// Values are interpolated as stored, without validation; a missing key
/// becomes [`MISSING_PLACEHOLDER`].
pub fn format_version(doc: &PropertiesDocument) -> String {
    [
        BUILD_VERSION_MAJOR_KEY,
        BUILD_VERSION_MINOR_KEY,
        BUILD_VERSION_REVISION_KEY,
        BUILD_NUMBER_KEY,
    ]
    .iter()
    .map(|key| doc.get(key).unwrap_or(MISSING_PLACEHOLDER))
    .collect::<Vec<_>>()
    .join(".")
}

/// Write the three externally managed components
///
/// `build.number` and `build.date` are left as they are.
pub fn set_version(doc: &mut PropertiesDocument, major: u32, minor: u32, revision: u32) {
    doc.set(BUILD_VERSION_MAJOR_KEY, major.to_string());
    doc.set(BUILD_VERSION_MINOR_KEY, minor.to_string());
    doc.set(BUILD_VERSION_REVISION_KEY, revision.to_string());
}

/// Typed view of a version record
///
/// Numeric fields that are missing or unparseable read as `0` and are
/// reported through the log rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub major: i64,
    pub minor: i64,
    pub revision: i64,
    pub build_number: i64,
    pub build_date: Option<String>,
}

impl VersionInfo {
    pub fn from_document(doc: &PropertiesDocument) -> Self {
        let build_date = doc.get(BUILD_DATE_KEY).map(str::to_string);
        if build_date.is_none() {
            log::warn!("No value for key {}", BUILD_DATE_KEY);
        }

        Self {
            major: int_or_zero(doc, BUILD_VERSION_MAJOR_KEY),
            minor: int_or_zero(doc, BUILD_VERSION_MINOR_KEY),
            revision: int_or_zero(doc, BUILD_VERSION_REVISION_KEY),
            build_number: int_or_zero(doc, BUILD_NUMBER_KEY),
            build_date,
        }
    }
}

fn int_or_zero(doc: &PropertiesDocument, key: &str) -> i64 {
    let raw = doc.get(key).unwrap_or("");
    raw.trim().parse().unwrap_or_else(|_| {
        log::warn!("Couldn't parse int from {:?} for key {}", raw, key);
        0
    })
}
