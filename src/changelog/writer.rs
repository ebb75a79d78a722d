//! Write new version sections.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ChangelogError;

use super::parser::Document;

/// Build the new document content with a section for `version` on top.
///
/// The result is the heading, the new section and the previous content after
/// the heading, unchanged. `changes` must already use the document's newline
/// style. A `footer` becomes the last paragraph of the new section.
pub fn merge(document: &Document, version: &str, changes: &str, footer: Option<&str>) -> String {
    let nl = document.newline.as_str();

    let mut next = document.heading();
    next.push_str(&format!("## {}{}{}", version, nl, nl));
    next.push_str(changes);

    if let Some(footer) = footer {
        next.push_str(nl);
        next.push_str(footer);
        next.push_str(nl);
    }

    let remainder = document.remainder();
    if !remainder.is_empty() {
        next.push_str(nl);
        next.push_str(remainder);
    }

    next
}

/// Replace the file at `path` with `content`.
///
/// Existing files are replaced atomically through a temporary file in the
/// same directory, keeping their permissions. A symlink is followed and its
/// target replaced. New files are written directly.
pub fn write_changes_file(path: &Path, content: &str) -> Result<(), ChangelogError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return std::fs::write(path, content).map_err(ChangelogError::WriteFailed),
    };

    let target = std::fs::canonicalize(path).map_err(ChangelogError::WriteFailed)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(ChangelogError::WriteFailed)?;
    temp.write_all(content.as_bytes())
        .map_err(ChangelogError::WriteFailed)?;
    std::fs::set_permissions(temp.path(), metadata.permissions())
        .map_err(ChangelogError::WriteFailed)?;
    temp.persist(&target)
        .map_err(|e| ChangelogError::WriteFailed(e.error))?;

    Ok(())
}
