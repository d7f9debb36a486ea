//! build-stamp library
//!
//! Reads, stamps and formats the `key=value` version record a plugin build
//! embeds in its packaging metadata.
//!
//! ```
//! use build_stamp::record::{format_version, PropertiesDocument};
//!
//! let doc = PropertiesDocument::parse(
//!     "build.version.major=2\nbuild.version.minor=0\nbuild.version.revision=3\nbuild.number=17\n",
//! );
//! assert_eq!(format_version(&doc), "2.0.3.17");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod record;
