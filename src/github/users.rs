//! GitHub user search by email.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::GitHubError;

use super::auth::get_github_token;

/// Default timeout for the profile lookup (5 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "CHANGES_GITHUB_TIMEOUT";

/// Get the configured lookup timeout.
///
/// Reads from CHANGES_GITHUB_TIMEOUT if set, otherwise uses 5 seconds.
/// Logs a warning if the variable holds an invalid value.
pub fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Looks up a public profile page for an email address.
///
/// This abstraction allows mocking the remote service in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// The profile URL of the single user with this email, if exactly one matches.
    async fn homepage(&self, email: &str) -> Result<Option<String>, GitHubError>;
}

#[derive(Debug, Deserialize)]
struct UserSearch {
    #[serde(default)]
    items: Vec<UserHit>,
}

#[derive(Debug, Deserialize)]
struct UserHit {
    html_url: Option<String>,
}

/// Profile lookup through the GitHub user search API.
///
/// The octocrab client is only built when a lookup runs.
pub struct GitHubUsers {
    base_uri: Option<String>,
    authenticate: bool,
    timeout: Duration,
}

impl GitHubUsers {
    /// Look up against api.github.com with the configured timeout,
    /// authenticated if a token is found.
    pub fn from_env() -> Self {
        Self {
            base_uri: None,
            authenticate: true,
            timeout: get_timeout(),
        }
    }

    /// Look up anonymously against another API root.
    ///
    /// This allows testing with mock servers.
    pub fn with_base_uri(base_uri: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_uri: Some(base_uri.into()),
            authenticate: false,
            timeout,
        }
    }

    fn client(&self) -> Result<Octocrab, GitHubError> {
        // One request per lookup, a failure is reported as is
        let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);

        if self.authenticate {
            if let Some(token) = get_github_token() {
                builder = builder.personal_token(token);
            }
        }
        if let Some(uri) = &self.base_uri {
            builder = builder.base_uri(uri.as_str()).map_err(client_error)?;
        }

        builder.build().map_err(client_error)
    }

    async fn search(&self, client: &Octocrab, email: &str) -> Result<UserSearch, GitHubError> {
        let params = [("q", email), ("in", "email")];
        client
            .get("/search/users", Some(&params))
            .await
            .map_err(|e| GitHubError::Request(Box::new(e)))
    }
}

fn client_error(e: octocrab::Error) -> GitHubError {
    GitHubError::Client(Box::new(e))
}

#[async_trait]
impl ProfileLookup for GitHubUsers {
    async fn homepage(&self, email: &str) -> Result<Option<String>, GitHubError> {
        let client = self.client()?;

        // Dropping the request future on timeout aborts it
        let result = timeout(self.timeout, self.search(&client, email))
            .await
            .map_err(|_| GitHubError::Timeout(self.timeout))??;

        let mut items = result.items;
        if items.len() != 1 {
            debug!(matches = items.len(), "No unique GitHub user for email");
            return Ok(None);
        }

        Ok(items.pop().and_then(|hit| hit.html_url))
    }
}
