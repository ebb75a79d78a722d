//! Commit log to Markdown formatting.
//!
//! The raw `git log` output is rewritten by an ordered sequence of passes,
//! each with a single responsibility:
//!
//! 1. collapse runs of three or more newlines into one
//! 2. quote every line that does not start a commit record
//! 3. trim the trailing space of blank quote lines
//! 4. turn commit markers into list bullets
//! 5. put commit links on their own line
//! 6. drop the project owner's own `(Name)` attribution
//! 7. convert to the document's newline style
//!
//! All passes before the last one work on bare `\n`.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::git::{COMMIT_MARKER, LINK_MARKER};

/// Prefix of a quoted commit body line.
pub const QUOTE_PREFIX: &str = "    > ";

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run pattern is valid"));

static BODY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)^([^{}])", COMMIT_MARKER)).expect("body line pattern is valid")
});

static BLANK_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ {4}> \n").expect("blank quote pattern is valid"));

static RECORD_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)^{}", COMMIT_MARKER)).expect("record start pattern is valid")
});

/// Line ending convention of a changelog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }

    /// Convert bare `\n` line endings to this style.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Newline::Lf => text.to_string(),
            Newline::CrLf => text.replace('\n', "\r\n"),
        }
    }
}

/// Format raw `git log` output as the Markdown body of a version section.
///
/// `owner` is the project owner's display name. Entries attributed to
/// exactly that name lose their `(Name)` suffix.
pub fn format_log(raw: &str, owner: Option<&str>, newline: Newline) -> String {
    let text = collapse_blank_runs(raw);
    let text = quote_bodies(&text);
    let text = trim_blank_quotes(&text);
    let text = bullet_records(&text);
    let text = split_links(&text);
    let text = match owner {
        Some(name) => strip_attribution(&text, name),
        None => text,
    };
    newline.apply(&text)
}

/// Commits without a body leave a run of blank lines behind.
fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUNS.replace_all(text, "\n").into_owned()
}

/// Nest bodies as block quotes below their summary line. Blank lines are
/// quoted too, which keeps paragraphs and lists of one body together.
fn quote_bodies(text: &str) -> String {
    BODY_LINE
        .replace_all(text, format!("{}${{1}}", QUOTE_PREFIX).as_str())
        .into_owned()
}

fn trim_blank_quotes(text: &str) -> String {
    BLANK_QUOTE.replace_all(text, "    >\n").into_owned()
}

fn bullet_records(text: &str) -> String {
    RECORD_START.replace_all(text, "-").into_owned()
}

fn split_links(text: &str) -> String {
    text.replace(LINK_MARKER, "\n")
}

/// Remove ` (owner)` from the end of every line.
fn strip_attribution(text: &str, owner: &str) -> String {
    let pattern = format!(r"(?m) \({}\)$", regex_lite::escape(owner));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}
