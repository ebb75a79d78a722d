//! Read and validate an existing changes file.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use crate::error::ChangelogError;

use super::format::Newline;

/// First line of every changes file.
pub const HEADING: &str = "# Changes";

static VERSION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^## ([0-9a-z.\-]+)\r?$").expect("version heading pattern is valid")
});

/// A changes file held in memory for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub newline: Newline,
}

impl Document {
    /// A new document consisting of the heading only.
    pub fn empty() -> Self {
        let newline = Newline::default();
        Self {
            content: heading(newline),
            newline,
        }
    }

    /// Validate the heading of `content` and capture its newline style.
    ///
    /// The content must start with `# Changes` followed by one blank line,
    /// using either `\n` or `\r\n` consistently.
    pub fn parse(content: String, path: &Path) -> Result<Self, ChangelogError> {
        let newline = [Newline::Lf, Newline::CrLf]
            .into_iter()
            .find(|nl| content.starts_with(&heading(*nl)))
            .ok_or_else(|| ChangelogError::MalformedHeader {
                path: path.to_path_buf(),
            })?;

        Ok(Self { content, newline })
    }

    /// The heading including its blank line separator.
    pub fn heading(&self) -> String {
        heading(self.newline)
    }

    /// Everything after the heading.
    pub fn remainder(&self) -> &str {
        &self.content[self.heading().len()..]
    }

    /// The most recently recorded version.
    pub fn latest_version(&self) -> Option<&str> {
        latest_version(&self.content)
    }

    /// Whether a `## <version>` section exists.
    pub fn has_version(&self, version: &str) -> bool {
        contains_version(&self.content, version)
    }
}

fn heading(newline: Newline) -> String {
    let nl = newline.as_str();
    format!("{}{}{}", HEADING, nl, nl)
}

/// Read a changes file. A missing file yields an empty document.
pub fn read_document(path: &Path) -> Result<Document, ChangelogError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Document::parse(content, path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist, starting a new one", path.display());
            Ok(Document::empty())
        }
        Err(e) => Err(ChangelogError::ReadFailed(e)),
    }
}

/// The version of the topmost `## <version>` heading.
pub fn latest_version(content: &str) -> Option<&str> {
    VERSION_HEADING
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `content` has a `## <version>` heading line, in either newline style.
pub fn contains_version(content: &str, version: &str) -> bool {
    [Newline::Lf, Newline::CrLf].iter().any(|nl| {
        let nl = nl.as_str();
        content.contains(&format!("{}## {}{}", nl, version, nl))
    })
}
