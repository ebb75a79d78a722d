//! GitHub token discovery.
//!
//! The user search works anonymously, a token only raises the rate limit.
//! Auth order:
//! 1. `gh auth token` (gh CLI)
//! 2. GITHUB_TOKEN environment variable
//! 3. GH_TOKEN environment variable

use std::env;
use std::process::Command;

/// Find a GitHub token, `None` if no auth is configured.
pub fn get_github_token() -> Option<String> {
    get_token_from_gh_cli()
        .or_else(|| token_from_env("GITHUB_TOKEN"))
        .or_else(|| token_from_env("GH_TOKEN"))
}

fn token_from_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|token| !token.is_empty())
}

/// Try to get a token from the gh CLI.
fn get_token_from_gh_cli() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}
