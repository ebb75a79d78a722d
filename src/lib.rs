//! changes - Generate a `CHANGES.md` section from the commits since the last release.
//!
//! # Overview
//!
//! changes reads the last released version from the changes file, collects the
//! commit log since its tag, formats it as a Markdown list and writes it as a new
//! version section. The result is opened in an editor for review and then
//! either staged for the version commit or rolled back.

pub mod changelog;
pub mod editor;
pub mod error;
pub mod footer;
pub mod git;
pub mod github;
pub mod project;
pub mod release;

// Re-export commonly used types
pub use changelog::{Document, Newline};
pub use error::{ChangelogError, EditorError, GitError, GitHubError, InitError, MetadataError};
pub use git::{GitCli, LogQuery, VersionControl};
pub use github::{GitHubUsers, ProfileLookup};
pub use project::Project;
pub use release::{ChangesConfig, CommitLinks, Completion, ReleaseState, write_changes};
