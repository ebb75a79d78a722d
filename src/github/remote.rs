//! Hosted repository URL normalization.

/// Hosts whose repositories can be browsed at `https://<host>/<owner>/<repo>`.
const KNOWN_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

/// Resolve a package.json repository URL to its web page.
///
/// Accepts shorthands (`owner/repo`, `github:owner/repo`, `gitlab:...`,
/// `bitbucket:...`), SSH (`git@github.com:owner/repo.git`) and URL forms
/// (`https://`, `git://`, `git+https://`, `git+ssh://git@...`) on known hosts.
/// Returns `None` for anything else.
pub fn browse_url(repository: &str) -> Option<String> {
    let repository = repository.trim();

    for (prefix, host) in [
        ("github:", "github.com"),
        ("gitlab:", "gitlab.com"),
        ("bitbucket:", "bitbucket.org"),
    ] {
        if let Some(path) = repository.strip_prefix(prefix) {
            return format_browse(host, path);
        }
    }

    // SSH format: git@host:owner/repo.git
    if let Some(rest) = repository.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        return known_host(host).and_then(|host| format_browse(host, path));
    }

    if let Some((_, rest)) = repository.split_once("://") {
        let rest = rest.rsplit_once('@').map_or(rest, |(_, after)| after);
        let (host, path) = rest.split_once('/')?;
        let host = host.split(':').next().unwrap_or(host);
        return known_host(host).and_then(|host| format_browse(host, path));
    }

    // GitHub shorthand: owner/repo
    if !repository.contains(':') && repository.matches('/').count() == 1 {
        return format_browse("github.com", repository);
    }

    None
}

fn known_host(host: &str) -> Option<&'static str> {
    let host = host.strip_prefix("www.").unwrap_or(host);
    KNOWN_HOSTS.iter().copied().find(|known| *known == host)
}

fn format_browse(host: &str, path: &str) -> Option<String> {
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut parts = path.split('/');

    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            Some(format!("https://{}/{}/{}", host, owner, repo))
        }
        _ => None,
    }
}
