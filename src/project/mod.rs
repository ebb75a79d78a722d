//! Project metadata and package.json maintenance.

pub mod init;
pub mod metadata;

pub use init::install_scripts;
pub use metadata::{Author, PACKAGE_JSON, Project, Repository};
