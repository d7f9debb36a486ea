//! File-backed version record storage

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use super::properties::PropertiesDocument;
use super::version::{self, Stamp};
use crate::error::RecordError;

/// Mode for a record file that did not exist before the first save
#[cfg(unix)]
const NEW_RECORD_MODE: u32 = 0o644;

/// A version record stored at a fixed path
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the record; a missing file is an error
    pub fn load(&self) -> Result<PropertiesDocument, RecordError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| RecordError::io(&self.path, e))?;
        Ok(PropertiesDocument::parse(&content))
    }

    /// Read the record, treating a missing file as an empty one
    pub fn load_or_default(&self) -> Result<PropertiesDocument, RecordError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(PropertiesDocument::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{} does not exist, starting empty", self.path.display());
                Ok(PropertiesDocument::default())
            }
            Err(e) => Err(RecordError::io(&self.path, e)),
        }
    }

    /// Replace the record on disk with `doc`
    ///
    /// The new content goes to a temporary file in the same directory which
    /// is then renamed over the target. The directory must already exist.
    pub fn save(&self, doc: &PropertiesDocument) -> Result<(), RecordError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        match fs::metadata(&self.path) {
            Ok(metadata) => {
                builder.permissions(metadata.permissions());
            }
            Err(_) => {
                // New records get the usual file mode rather than the 0600 of a temp file
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    builder.permissions(fs::Permissions::from_mode(NEW_RECORD_MODE));
                }
            }
        }

        let mut tmp = builder
            .tempfile_in(dir)
            .map_err(|e| RecordError::io(dir, e))?;
        tmp.write_all(doc.render().as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| RecordError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|source| RecordError::Persist {
                path: self.path.clone(),
                source,
            })?;

        log::debug!("wrote {}", self.path.display());
        Ok(())
    }
}

/// Load, stamp with today's date, and save
pub fn stamp_build(store: &FileStore) -> Result<Stamp, RecordError> {
    stamp_build_on(store, Local::now().date_naive())
}

/// [`stamp_build`] with an explicit date
pub fn stamp_build_on(store: &FileStore, today: NaiveDate) -> Result<Stamp, RecordError> {
    let mut doc = store.load_or_default()?;
    let stamp = version::stamp(&mut doc, today)?;
    store.save(&doc)?;
    Ok(stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::version::{format_version, BUILD_DATE_KEY, BUILD_NUMBER_KEY};
    use tempfile::tempdir;

    const RECORD: &str = "# Plugin build data\n\
                          build.version.major=2\n\
                          build.version.minor=0\n\
                          build.version.revision=3\n\
                          \n\
                          ! maintained by the release job\n\
                          plugin.channel = eap\n\
                          build.number=17\n\
                          build.date=March 3, 2024\n";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_trip_read_is_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        fs::write(&path, RECORD).unwrap();

        let store = FileStore::new(&path);
        let doc = store.load().unwrap();
        store.save(&doc).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), RECORD);
        assert_eq!(format_version(&store.load().unwrap()), "2.0.3.17");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.properties"));

        assert!(matches!(store.load(), Err(RecordError::Io { .. })));
        assert!(store.load_or_default().unwrap().get(BUILD_NUMBER_KEY).is_none());
    }

    #[test]
    fn test_stamp_build_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        fs::write(&path, RECORD).unwrap();
        let store = FileStore::new(&path);

        let stamp = stamp_build_on(&store, date(2024, 4, 5)).unwrap();
        assert_eq!(stamp.build_number, 18);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Plugin build data\n\
             build.version.major=2\n\
             build.version.minor=0\n\
             build.version.revision=3\n\
             \n\
             ! maintained by the release job\n\
             plugin.channel = eap\n\
             build.number=18\n\
             build.date=April 5, 2024\n"
        );
        assert_eq!(format_version(&store.load().unwrap()), "2.0.3.18");
    }

    #[test]
    fn test_stamp_build_twice() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        fs::write(&path, RECORD).unwrap();
        let store = FileStore::new(&path);

        stamp_build_on(&store, date(2024, 4, 5)).unwrap();
        stamp_build_on(&store, date(2024, 4, 7)).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.get(BUILD_NUMBER_KEY), Some("19"));
        assert_eq!(doc.get(BUILD_DATE_KEY), Some("April 7, 2024"));
    }

    #[test]
    fn test_stamp_build_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        let store = FileStore::new(&path);

        stamp_build_on(&store, date(2024, 4, 5)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "build.number=2\nbuild.date=April 5, 2024\n"
        );
    }

    #[test]
    fn test_stamp_build_invalid_number_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        let original = "build.number=abc\nbuild.date=May 1, 2020\n";
        fs::write(&path, original).unwrap();
        let store = FileStore::new(&path);

        let err = stamp_build_on(&store, date(2024, 4, 5)).unwrap_err();
        assert!(matches!(err, RecordError::InvalidBuildNumber { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_stamp_build_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("build.properties");
        let store = FileStore::new(&path);

        assert!(stamp_build_on(&store, date(2024, 4, 5)).is_err());
        assert!(!path.exists());
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_stamp_build_bom_prefixed_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        fs::write(&path, "\u{FEFF}build.number=17\n").unwrap();
        let store = FileStore::new(&path);

        let stamp = stamp_build_on(&store, date(2024, 4, 5)).unwrap();
        assert_eq!(stamp.build_number, 18);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\u{FEFF}build.number=18\nbuild.date=April 5, 2024\n"
        );
    }

    #[test]
    fn test_stamp_build_crlf_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        fs::write(&path, "build.number=17\r\nbuild.version.major=1\r\n").unwrap();
        let store = FileStore::new(&path);

        stamp_build_on(&store, date(2024, 4, 5)).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "build.number=18\r\nbuild.version.major=1\r\nbuild.date=April 5, 2024\r\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_new_record_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        // A plain file shows the effective umask
        let reference = dir.path().join("reference");
        fs::write(&reference, "").unwrap();
        let reference_mode = fs::metadata(&reference).unwrap().permissions().mode() & 0o777;

        let path = dir.path().join("build.properties");
        stamp_build_on(&FileStore::new(&path), date(2024, 4, 5)).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, reference_mode & NEW_RECORD_MODE);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("build.properties");
        fs::write(&path, RECORD).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        stamp_build_on(&FileStore::new(&path), date(2024, 4, 5)).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
