//! Tag name templates.
//!
//! Templates use `${name}` placeholders. `${version}` is the released version,
//! every other name is looked up in package.json.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::MetadataError;
use crate::project::Project;

/// Tag template used when none is configured.
pub const DEFAULT_TAG_FORMAT: &str = "v${version}";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Tag template for a package inside a monorepo: `<dir>@v${version}`.
pub fn workspace_tag_format(dir_name: &str) -> String {
    format!("{}@{}", dir_name, DEFAULT_TAG_FORMAT)
}

/// Replace every `${name}` in `template` using `lookup`.
///
/// Fails on the first name `lookup` cannot resolve.
pub fn expand_placeholders<F>(template: &str, mut lookup: F) -> Result<String, MetadataError>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = lookup(name.as_str())
            .ok_or_else(|| MetadataError::UnknownPlaceholder(name.as_str().to_string()))?;
        expanded.push_str(&template[last..whole.start()]);
        expanded.push_str(&value);
        last = whole.end();
    }

    expanded.push_str(&template[last..]);
    Ok(expanded)
}

/// Expand placeholders from package.json fields only.
pub fn expand_from_project(template: &str, project: &Project) -> Result<String, MetadataError> {
    expand_placeholders(template, |name| project.field(name))
}

/// Render the tag name of `version` from `template`.
pub fn tag_name(template: &str, version: &str, project: &Project) -> Result<String, MetadataError> {
    expand_placeholders(template, |name| match name {
        "version" => Some(version.to_string()),
        other => project.field(other),
    })
}
