//! Release pipeline: generate the new version section, merge it into the
//! changes file and later stage or roll back the result.
//!
//! Stages of [`write_changes`]:
//! 1. read the changes file (missing file = new document, bad header = error)
//! 2. resolve the commit range from the last recorded version
//! 3. query and format the commit log
//! 4. reject versions that already have a section
//! 5. generate the optional footer
//! 6. merge and write
//!
//! Everything before the final write happens in memory, so a failure at any
//! stage leaves the file untouched.

pub mod links;

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::changelog::parser::{contains_version, read_document};
use crate::changelog::{format_log, merge, write_changes_file};
use crate::error::ChangelogError;
use crate::footer::{Identity, generate_footer};
use crate::git::{DEFAULT_TAG_FORMAT, LogQuery, VersionControl, resolve_range};
use crate::github::ProfileLookup;
use crate::project::Project;

pub use links::{CommitLinks, resolve_commit_base};

/// Default changes file name.
pub const CHANGES_FILE: &str = "CHANGES.md";

/// Configuration for one run, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct ChangesConfig {
    pub changes_file: PathBuf,
    pub tag_format: String,
    pub commits: CommitLinks,
    pub footer: bool,
    /// Only include commits touching this path.
    pub package_dir: Option<PathBuf>,
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            changes_file: PathBuf::from(CHANGES_FILE),
            tag_format: DEFAULT_TAG_FORMAT.to_string(),
            commits: CommitLinks::Disabled,
            footer: false,
            package_dir: None,
        }
    }
}

/// What a successful write leaves behind: enough to stage or undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseState {
    /// The changes file content before this run.
    pub previous: String,
    pub changes_file: PathBuf,
}

/// How a release run ended after review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Staged,
    RolledBack,
}

impl Completion {
    pub fn is_success(&self) -> bool {
        matches!(self, Completion::Staged)
    }
}

/// Write the commit history since the last release to the changes file.
pub async fn write_changes<V, L>(
    config: &ChangesConfig,
    project: &Project,
    vcs: &V,
    lookup: &L,
) -> Result<ReleaseState, ChangelogError>
where
    V: VersionControl + ?Sized,
    L: ProfileLookup + ?Sized,
{
    let path = config.changes_file.as_path();
    let document = read_document(path)?;

    let range = resolve_range(&document.content, &config.tag_format, project)?;
    let commit_base = resolve_commit_base(&config.commits, project)?;

    let query = LogQuery::new(
        range.to_revision(),
        commit_base.as_deref(),
        config.package_dir.clone(),
    );
    info!(range = ?query.range, "Querying commit log");
    let log = vcs.log(&query).map_err(ChangelogError::Log)?;

    let owner = project.owner_name();
    let changes = format_log(&log, owner.as_deref(), document.newline);

    if document.has_version(&project.version) {
        warn!(version = %project.version, "Version already in changes file");
        return Err(ChangelogError::VersionAlreadyExists {
            version: project.version.clone(),
            path: path.to_path_buf(),
            pending: changes,
        });
    }

    let footer = if config.footer {
        let identity = Identity::resolve(vcs);
        let today = Utc::now().date_naive();
        Some(
            generate_footer(&identity, lookup, today)
                .await
                .map_err(ChangelogError::Footer)?,
        )
    } else {
        None
    };

    let next = merge(&document, &project.version, &changes, footer.as_deref());
    write_changes_file(path, &next)?;
    info!(version = %project.version, "Wrote {}", path.display());

    Ok(ReleaseState {
        previous: document.content,
        changes_file: config.changes_file.clone(),
    })
}

impl ReleaseState {
    /// Stage the changes file, unless the reviewer removed the `version`
    /// section, in which case the file is rolled back.
    pub fn commit<V: VersionControl + ?Sized>(
        self,
        version: &str,
        vcs: &V,
    ) -> Result<Completion, ChangelogError> {
        let current = read_current(&self.changes_file)?;

        if !contains_version(&current, version) {
            info!(version, "Version section removed during review, rolling back");
            return self.abort();
        }

        vcs.add(&self.changes_file).map_err(ChangelogError::Stage)?;
        debug!("Staged {}", self.changes_file.display());
        Ok(Completion::Staged)
    }

    /// Restore the changes file to its content before the run.
    pub fn abort(self) -> Result<Completion, ChangelogError> {
        write_changes_file(&self.changes_file, &self.previous)?;
        info!("Restored {}", self.changes_file.display());
        Ok(Completion::RolledBack)
    }
}

fn read_current(path: &Path) -> Result<String, ChangelogError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(ChangelogError::ReadFailed(e)),
    }
}
