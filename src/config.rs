//! Record location and formatting settings

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Record path used when neither `--file` nor the environment names one
pub const DEFAULT_RECORD_PATH: &str = "build/build.properties";

/// Environment variable overriding [`DEFAULT_RECORD_PATH`]
pub const RECORD_PATH_ENV: &str = "BUILD_STAMP_FILE";

/// Environment variable holding a log specification, e.g. `debug`
pub const LOG_SPEC_ENV: &str = "BUILD_STAMP_LOG";

/// chrono pattern for `build.date`: full month name, day, comma, year
pub const BUILD_DATE_PATTERN: &str = "%B %-d, %Y";

/// Resolve the record path
///
/// Precedence: explicit argument, then `BUILD_STAMP_FILE`, then
/// [`DEFAULT_RECORD_PATH`] relative to the working directory.
pub fn record_path(explicit: Option<&str>) -> Result<PathBuf> {
    let env_value = std::env::var(RECORD_PATH_ENV).ok();
    resolve_record_path(explicit, env_value.as_deref())
}

fn resolve_record_path(explicit: Option<&str>, env_value: Option<&str>) -> Result<PathBuf> {
    let raw = explicit
        .or(env_value.filter(|v| !v.trim().is_empty()))
        .unwrap_or(DEFAULT_RECORD_PATH);
    expand_home(raw)
}

/// Expand a leading `~/` to the home directory
fn expand_home(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return dirs::home_dir().context("Could not determine home directory");
    }
    match raw.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().context("Could not determine home directory")?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(raw)),
    }
}
