//! Commit range resolution.

use tracing::debug;

use crate::changelog::parser::latest_version;
use crate::error::MetadataError;
use crate::project::Project;

use super::tags::tag_name;

/// The revision range a log query covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Tag of the last recorded release, `None` for the entire history.
    pub from_tag: Option<String>,
}

impl CommitRange {
    /// The `<tag>..HEAD` revision range, `None` when unbounded.
    pub fn to_revision(&self) -> Option<String> {
        self.from_tag.as_ref().map(|tag| format!("{}..HEAD", tag))
    }
}

/// Resolve the commit range from the existing changelog content.
///
/// The topmost `## <version>` heading is the last release. Its tag is built
/// from `tag_format`. Without a recorded version the range covers the
/// entire history.
pub fn resolve_range(
    document: &str,
    tag_format: &str,
    project: &Project,
) -> Result<CommitRange, MetadataError> {
    let Some(version) = latest_version(document) else {
        debug!("No previous version in changelog, using entire history");
        return Ok(CommitRange { from_tag: None });
    };

    let tag = tag_name(tag_format, version, project)?;
    debug!(version, tag = %tag, "Resolved previous release");

    Ok(CommitRange { from_tag: Some(tag) })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::git::tags::DEFAULT_TAG_FORMAT;

    fn project() -> Project {
        Project::from_json(
            r#"{"name": "@studio/changes", "version": "1.0.0"}"#,
            Path::new("package.json"),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_document_is_unbounded() {
        let range = resolve_range("# Changes\n\n", DEFAULT_TAG_FORMAT, &project()).unwrap();
        assert_eq!(range.to_revision(), None);
    }

    #[test]
    fn test_range_from_latest_version() {
        let doc = "# Changes\n\n## 0.2.0\n\n- Two\n\n## 0.1.0\n\n- One\n";
        let range = resolve_range(doc, DEFAULT_TAG_FORMAT, &project()).unwrap();
        assert_eq!(range.to_revision().as_deref(), Some("v0.2.0..HEAD"));
    }

    #[test]
    fn test_range_with_beta_suffix() {
        let doc = "# Changes\n\n## 0.1.0-beta\n\nSome foo.\n";
        let range = resolve_range(doc, DEFAULT_TAG_FORMAT, &project()).unwrap();
        assert_eq!(range.to_revision().as_deref(), Some("v0.1.0-beta..HEAD"));
    }

    #[test]
    fn test_range_with_custom_tag_format() {
        let doc = "# Changes\n\n## 0.1.0\n\nSome foo.\n";
        let range = resolve_range(doc, "${name}@${version}", &project()).unwrap();
        assert_eq!(range.to_revision().as_deref(), Some("@studio/changes@0.1.0..HEAD"));
    }

    #[test]
    fn test_range_with_unknown_placeholder() {
        let doc = "# Changes\n\n## 0.1.0\n\nSome foo.\n";
        let result = resolve_range(doc, "${scope}/${version}", &project());
        assert!(matches!(result, Err(MetadataError::UnknownPlaceholder(_))));
    }
}
