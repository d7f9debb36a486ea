//! Set command - Write the major, minor and revision components

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::record::{self, version, FileStore};

/// Parse `MAJOR.MINOR.REVISION`
pub fn parse_triple(s: &str) -> Result<(u32, u32, u32)> {
    let parts: Vec<&str> = s.trim().split('.').collect();
    if parts.len() != 3 {
        bail!("Expected MAJOR.MINOR.REVISION, got: {}", s);
    }

    let parse = |name: &str, part: &str| -> Result<u32> {
        part.parse::<u32>()
            .with_context(|| format!("Invalid {} component: {:?}", name, part))
    };

    Ok((
        parse("major", parts[0])?,
        parse("minor", parts[1])?,
        parse("revision", parts[2])?,
    ))
}

/// Write the semantic version into the record at `path`
///
/// The build number and date are left alone; a missing file is created.
pub fn execute(path: &Path, triple: &str) -> Result<String> {
    let (major, minor, revision) = parse_triple(triple)?;
    let store = FileStore::new(path);

    let mut doc = store
        .load_or_default()
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    version::set_version(&mut doc, major, minor, revision);
    store
        .save(&doc)
        .with_context(|| format!("Failed to write: {}", path.display()))?;

    eprintln!(
        "{} {}.{}.{} in {}",
        "Set:".green(),
        major,
        minor,
        revision,
        path.display()
    );
    Ok(record::format_version(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_triple() {
        assert_eq!(parse_triple("2.0.3").unwrap(), (2, 0, 3));
        assert_eq!(parse_triple(" 10.20.30 ").unwrap(), (10, 20, 30));
        assert!(parse_triple("2.0").is_err());
        assert!(parse_triple("2.0.3.4").is_err());
        assert!(parse_triple("2.x.3").is_err());
        assert!(parse_triple("-1.0.0").is_err());
    }

    #[test]
    fn test_execute_updates_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        fs::write(
            &path,
            "# keep me\nbuild.version.major=1\nbuild.number=41\nbuild.date=May 1, 2020\n",
        )
        .unwrap();

        assert_eq!(execute(&path, "2.1.0").unwrap(), "2.1.0.41");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# keep me\nbuild.version.major=2\n"));
        assert!(content.contains("build.date=May 1, 2020\n"));
    }

    #[test]
    fn test_execute_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");

        assert_eq!(execute(&path, "0.1.0").unwrap(), "0.1.0.null");
        assert!(path.exists());
    }
}
