//! Version control access through the system `git` binary.
//!
//! All operations use `std::process::Command` to shell out to `git`,
//! inheriting the user's existing git config.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

use super::commits::LogQuery;

/// The version control operations the changelog generator needs.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Run a log query and return its raw output.
    fn log(&self, query: &LogQuery) -> Result<String, GitError>;

    /// Stage a file for the next commit.
    fn add(&self, path: &Path) -> Result<(), GitError>;

    /// Read a config value, `None` if unset or unreadable.
    fn config_get(&self, key: &str) -> Option<String>;
}

/// `git` command line in a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Run a git command and return its stdout or a descriptive error.
    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!(?args, "Running git {}", operation);

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::Spawn {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for GitCli {
    fn log(&self, query: &LogQuery) -> Result<String, GitError> {
        let args = query.to_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_git(&args, "log")
    }

    fn add(&self, path: &Path) -> Result<(), GitError> {
        let path = path.to_string_lossy();
        self.run_git(&["add", path.as_ref()], "add")?;
        Ok(())
    }

    fn config_get(&self, key: &str) -> Option<String> {
        let value = self.run_git(&["config", "--get", key], "config").ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}
