//! Version record: parsing, stamping and storage

pub mod properties;
pub mod store;
pub mod version;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use properties::PropertiesDocument;
#[allow(unused_imports)]
pub use store::{stamp_build, FileStore};
#[allow(unused_imports)]
pub use version::{format_version, stamp, Stamp, VersionInfo};
