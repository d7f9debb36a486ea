//! CLI commands

pub mod set;
pub mod show;
pub mod stamp;
pub mod version;
