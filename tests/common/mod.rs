//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use changes::error::GitHubError;
use changes::github::ProfileLookup;
use changes::project::Project;
use git2::{Oid, Repository, Signature};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the working tree.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Set a value in the repository's local git config.
    pub fn set_config(&self, key: &str, value: &str) {
        let mut config = self.repo.config().expect("Failed to open config");
        config.set_str(key, value).expect("Failed to set config");
    }

    /// Commit a change to `file` with the given message and author. Returns the commit OID.
    pub fn commit_as(&self, author: &str, message: &str, file: &str) -> Oid {
        let sig = Signature::now(author, "author@example.com").expect("Failed to create signature");

        // Create or update a file to have something to commit
        let file_path = self.file(file);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directory");
        }
        let content = format!(
            "{}\n{}",
            message,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        std::fs::write(&file_path, content).expect("Failed to write test file");

        // Add the file to the index
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(file)).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        // Get parent commit if exists
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Commit a change to `test.txt`.
    pub fn commit(&self, author: &str, message: &str) -> Oid {
        self.commit_as(author, message, "test.txt")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Whether `name` is staged in a freshly read index.
    pub fn is_staged(&self, name: &str) -> bool {
        let repo = Repository::open(self.path()).expect("Failed to reopen repo");
        let index = repo.index().expect("Failed to get index");
        index.get_path(Path::new(name), 0).is_some()
    }
}

/// Project metadata as found in the studio-changes package.json.
pub fn studio_project(version: &str) -> Project {
    let json = format!(
        r#"{{"name": "@studio/changes", "version": "{}", "author": "Studio <support@javascript.studio>"}}"#,
        version
    );
    Project::from_json(&json, Path::new("package.json")).expect("Failed to parse project")
}

/// Profile lookup with a fixed answer.
pub struct FixedProfile(pub Option<&'static str>);

#[async_trait]
impl ProfileLookup for FixedProfile {
    async fn homepage(&self, _email: &str) -> Result<Option<String>, GitHubError> {
        Ok(self.0.map(String::from))
    }
}
