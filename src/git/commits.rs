//! Commit log query construction.
//!
//! Each commit is rendered as one record starting with [`COMMIT_MARKER`],
//! followed by the optional commit link, the subject, the author in
//! parentheses, a blank line and the body:
//!
//! ```text
//! » [`abc1234`](https://example.com/commit/abc1234...)«  Subject (Author)
//!
//! Body
//! ```

use std::path::PathBuf;

/// Marks the start of a commit record. Unlikely to appear in commit messages.
pub const COMMIT_MARKER: char = '»';

/// Separates the commit link from the subject when links are enabled.
pub const LINK_MARKER: char = '«';

/// Build the `--format` placeholder string for `git log`.
///
/// With a `commit_base`, every record starts with a Markdown link to
/// `<commit_base>/<full hash>` labelled with the short hash.
pub fn log_format(commit_base: Option<&str>) -> String {
    let mut format = format!("{} ", COMMIT_MARKER);
    if let Some(base) = commit_base {
        format.push_str(&format!("[`%h`]({}/%H){}  ", base, LINK_MARKER));
    }
    format.push_str("%s (%an)%n%n%b");
    format
}

/// A bounded, non-merge `git log` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Revision range such as `v1.0.0..HEAD`, `None` for the entire history.
    pub range: Option<String>,
    pub format: String,
    /// Limit the log to commits touching this path.
    pub path: Option<PathBuf>,
}

impl LogQuery {
    pub fn new(range: Option<String>, commit_base: Option<&str>, path: Option<PathBuf>) -> Self {
        Self {
            range,
            format: log_format(commit_base),
            path,
        }
    }

    /// Command line arguments for `git`.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["log".to_string()];
        if let Some(range) = &self.range {
            args.push(range.clone());
        }
        args.push(format!("--format={}", self.format));
        args.push("--no-merges".to_string());
        if let Some(path) = &self.path {
            args.push("--".to_string());
            args.push(path.to_string_lossy().into_owned());
        }
        args
    }
}
