//! Commit link base URL resolution for `--commits`.

use tracing::debug;

use crate::error::ChangelogError;
use crate::git::tags::expand_from_project;
use crate::github::browse_url;
use crate::project::Project;

/// How commit entries link to their commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CommitLinks {
    #[default]
    Disabled,
    /// Derive the base from `homepage` or `repository` in package.json.
    FromMetadata,
    /// Explicit base URL, may contain `${field}` placeholders.
    Template(String),
}

/// Resolve the base URL commit hashes are appended to.
///
/// Precedence: explicit template, then `<homepage>/commit`, then the browse
/// URL of a git `repository` plus `/commit`.
pub fn resolve_commit_base(
    links: &CommitLinks,
    project: &Project,
) -> Result<Option<String>, ChangelogError> {
    let base = match links {
        CommitLinks::Disabled => return Ok(None),
        CommitLinks::Template(template) => expand_from_project(template, project)?,
        CommitLinks::FromMetadata => metadata_base(project)?,
    };

    debug!(base = %base, "Linking commits");
    Ok(Some(base))
}

fn metadata_base(project: &Project) -> Result<String, ChangelogError> {
    if let Some(homepage) = &project.homepage {
        return Ok(format!("{}/commit", homepage.trim_end_matches('/')));
    }

    let url = project
        .repository
        .as_ref()
        .and_then(|repository| repository.git_url())
        .ok_or(ChangelogError::MissingCommitBase)?;

    let browse = browse_url(url).ok_or(ChangelogError::UnparsableRepository)?;
    Ok(format!("{}/commit", browse))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::error::MetadataError;

    fn project(json: &str) -> Project {
        Project::from_json(json, Path::new("package.json")).unwrap()
    }

    #[test]
    fn test_disabled() {
        let p = project(r#"{"version": "1.0.0", "homepage": "https://javascript.studio"}"#);
        assert_eq!(resolve_commit_base(&CommitLinks::Disabled, &p).unwrap(), None);
    }

    #[test]
    fn test_explicit_base_wins() {
        let p = project(r#"{"version": "1.0.0", "homepage": "https://javascript.studio"}"#);
        let links = CommitLinks::Template("https://javascript.studio/commit".to_string());
        assert_eq!(
            resolve_commit_base(&links, &p).unwrap().as_deref(),
            Some("https://javascript.studio/commit")
        );
    }

    #[test]
    fn test_template_with_placeholder() {
        let p = project(r#"{"version": "1.0.0", "homepage": "https://javascript.studio"}"#);
        let links = CommitLinks::Template("${homepage}/foo".to_string());
        assert_eq!(
            resolve_commit_base(&links, &p).unwrap().as_deref(),
            Some("https://javascript.studio/foo")
        );
    }

    #[test]
    fn test_template_with_unknown_placeholder() {
        let p = project(r#"{"version": "1.0.0"}"#);
        let links = CommitLinks::Template("${homepage}/foo".to_string());
        assert!(matches!(
            resolve_commit_base(&links, &p),
            Err(ChangelogError::Metadata(MetadataError::UnknownPlaceholder(_)))
        ));
    }

    #[test]
    fn test_homepage_base() {
        let p = project(
            r#"{"version": "1.0.0", "homepage": "https://github.com/javascript-studio/studio-changes",
                "repository": "https://gitlab.com/other/place"}"#,
        );
        assert_eq!(
            resolve_commit_base(&CommitLinks::FromMetadata, &p).unwrap().as_deref(),
            Some("https://github.com/javascript-studio/studio-changes/commit")
        );
    }

    #[test]
    fn test_repository_base() {
        let p = project(
            r#"{"version": "1.0.0", "repository": {"type": "git", "url": "https://github.com/javascript-studio/studio-changes.git"}}"#,
        );
        assert_eq!(
            resolve_commit_base(&CommitLinks::FromMetadata, &p).unwrap().as_deref(),
            Some("https://github.com/javascript-studio/studio-changes/commit")
        );
    }

    #[test]
    fn test_repository_shorthand_base() {
        let p = project(r#"{"version": "1.0.0", "repository": "javascript-studio/studio-changes"}"#);
        assert_eq!(
            resolve_commit_base(&CommitLinks::FromMetadata, &p).unwrap().as_deref(),
            Some("https://github.com/javascript-studio/studio-changes/commit")
        );
    }

    #[test]
    fn test_non_git_repository_is_ignored() {
        let p = project(
            r#"{"version": "1.0.0", "repository": {"type": "svn", "url": "https://svn.example.com/repo"}}"#,
        );
        assert!(matches!(
            resolve_commit_base(&CommitLinks::FromMetadata, &p),
            Err(ChangelogError::MissingCommitBase)
        ));
    }

    #[test]
    fn test_repository_without_url() {
        let p = project(
            r#"{"version": "1.0.0", "repository": {"type": "git", "directory": "packages/x"}}"#,
        );
        assert!(matches!(
            resolve_commit_base(&CommitLinks::FromMetadata, &p),
            Err(ChangelogError::MissingCommitBase)
        ));
        assert_eq!(resolve_commit_base(&CommitLinks::Disabled, &p).unwrap(), None);
    }

    #[test]
    fn test_unparsable_repository() {
        let p = project(r#"{"version": "1.0.0", "repository": "https://git.example.com/repo.git"}"#);
        assert!(matches!(
            resolve_commit_base(&CommitLinks::FromMetadata, &p),
            Err(ChangelogError::UnparsableRepository)
        ));
    }

    #[test]
    fn test_missing_base() {
        let p = project(r#"{"version": "1.0.0"}"#);
        let err = resolve_commit_base(&CommitLinks::FromMetadata, &p).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--commits option requires base URL, \"repository\" or \"homepage\" in package.json"
        );
    }
}
