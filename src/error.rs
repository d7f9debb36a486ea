//! Errors raised by the version record layer

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading, stamping or writing a version record
#[derive(Debug, Error)]
pub enum RecordError {
    /// `build.number` is present but is not an integer
    #[error("invalid build.number {value:?}: expected an integer")]
    InvalidBuildNumber { value: String },

    /// `build.number` cannot be incremented any further
    #[error("build.number {value} cannot be incremented without overflow")]
    BuildNumberOverflow { value: i64 },

    /// Reading or writing the backing file failed
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not be moved over the record
    #[error("failed to replace {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl RecordError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
