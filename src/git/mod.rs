//! Git operations through the `git` command line.

pub mod cli;
pub mod commits;
pub mod range;
pub mod tags;

pub use cli::{GitCli, VersionControl};
pub use commits::{COMMIT_MARKER, LINK_MARKER, LogQuery, log_format};
pub use range::{CommitRange, resolve_range};
pub use tags::{DEFAULT_TAG_FORMAT, expand_placeholders, tag_name, workspace_tag_format};
