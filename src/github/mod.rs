//! GitHub user lookup and hosted repository URLs.

pub mod auth;
pub mod remote;
pub mod users;

pub use auth::get_github_token;
pub use remote::browse_url;
pub use users::{GitHubUsers, ProfileLookup};
