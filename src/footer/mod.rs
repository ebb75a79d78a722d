//! Release footer generation.
//!
//! The footer credits whoever cuts the release:
//!
//! ```text
//! _Released by [Name](https://github.com/name) on 2024-01-01._
//! ```

use std::env;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::GitHubError;
use crate::git::VersionControl;
use crate::github::ProfileLookup;

/// Local identity of the person cutting the release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    /// Read `user.name` and `user.email` from git config, falling back to
    /// GIT_AUTHOR_NAME and GIT_AUTHOR_EMAIL.
    pub fn resolve<V: VersionControl + ?Sized>(vcs: &V) -> Self {
        let name = vcs
            .config_get("user.name")
            .or_else(|| env_value("GIT_AUTHOR_NAME"));

        // The email is only used for the profile link
        let email = name.as_ref().and_then(|_| {
            vcs.config_get("user.email")
                .or_else(|| env_value("GIT_AUTHOR_EMAIL"))
        });

        Self { name, email }
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Format the footer line.
pub fn build_footer(author: Option<&str>, homepage: Option<&str>, date: NaiveDate) -> String {
    let mut footer = String::from("_Released");
    match (author, homepage) {
        (Some(author), Some(homepage)) => footer.push_str(&format!(" by [{}]({})", author, homepage)),
        (Some(author), None) => footer.push_str(&format!(" by {}", author)),
        _ => {}
    }
    footer.push_str(&format!(" on {}._", date.format("%Y-%m-%d")));
    footer
}

/// Generate the footer for `identity`, linking the author's profile when the
/// lookup finds exactly one.
///
/// A failed or timed out lookup is an error; a footer without the link is
/// never substituted.
pub async fn generate_footer<L: ProfileLookup + ?Sized>(
    identity: &Identity,
    lookup: &L,
    date: NaiveDate,
) -> Result<String, GitHubError> {
    let Some(name) = identity.name.as_deref() else {
        return Ok(build_footer(None, None, date));
    };

    let Some(email) = identity.email.as_deref() else {
        return Ok(build_footer(Some(name), None, date));
    };

    let homepage = lookup.homepage(email).await?;
    debug!(email, homepage = ?homepage, "Profile lookup finished");

    Ok(build_footer(Some(name), homepage.as_deref(), date))
}
