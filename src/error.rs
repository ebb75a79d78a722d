//! Error types for changes modules using thiserror.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors from invoking the `git` command line.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {operation}: {source}")]
    Spawn {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },
}

/// Errors from reading project metadata (package.json).
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing \"version\" in {}", path.display())]
    MissingVersion { path: PathBuf },

    #[error("Unknown placeholder ${{{0}}}: no such field in package.json")]
    UnknownPlaceholder(String),
}

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Failed to build GitHub client: {0}")]
    Client(#[source] Box<octocrab::Error>),

    #[error("GitHub user search failed: {0}")]
    Request(#[source] Box<octocrab::Error>),

    #[error("GitHub user search timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors from changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read changelog: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write changelog: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Unexpected {} file header", path.display())]
    MalformedHeader { path: PathBuf },

    /// `pending` holds the formatted changes since that version, possibly empty.
    #[error("Version {version} is already in {}", path.display())]
    VersionAlreadyExists {
        version: String,
        path: PathBuf,
        pending: String,
    },

    #[error("--commits option requires base URL, \"repository\" or \"homepage\" in package.json")]
    MissingCommitBase,

    #[error("Failed to parse \"repository\" from package.json")]
    UnparsableRepository,

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Failed to query commit log: {0}")]
    Log(#[source] GitError),

    #[error("Failed to stage changelog: {0}")]
    Stage(#[source] GitError),

    #[error("Failed to generate release footer: {0}")]
    Footer(#[source] GitHubError),
}

/// Errors from installing the version lifecycle scripts.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object in {}", path.display())]
    NotAnObject { path: PathBuf },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from launching the interactive editor.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No editor found. Set the VISUAL or EDITOR environment variable")]
    NotFound,

    #[error("Failed to launch editor '{editor}': {source}")]
    Spawn {
        editor: String,
        #[source]
        source: std::io::Error,
    },
}
