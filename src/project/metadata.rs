//! Project metadata read from package.json.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::MetadataError;

/// Default metadata file name.
pub const PACKAGE_JSON: &str = "package.json";

/// The `author` field: either `"Name <email> (url)"` or `{ "name": ..., "email": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Text(String),
    Person {
        #[serde(default)]
        name: String,
        #[serde(default)]
        email: Option<String>,
    },
}

impl Author {
    /// The author's display name, without email or url decorations.
    pub fn display_name(&self) -> String {
        match self {
            Author::Text(text) => parse_author_name(text),
            Author::Person { name, .. } => name.trim().to_string(),
        }
    }
}

/// Take everything before the first `<` or `(` and trim it.
pub fn parse_author_name(author: &str) -> String {
    match author.find(['<', '(']) {
        Some(index) => author[..index].trim().to_string(),
        None => author.trim().to_string(),
    }
}

/// The `repository` field: a shorthand/URL string or `{ "type": ..., "url": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Detailed {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl Repository {
    /// The repository URL, if it is a git repository.
    ///
    /// A string is assumed to be git. A `{type, url}` pair without a type is
    /// treated the same way.
    pub fn git_url(&self) -> Option<&str> {
        match self {
            Repository::Url(url) => Some(url),
            Repository::Detailed { kind, url } => match kind.as_deref() {
                None | Some("git") => url.as_deref(),
                Some(_) => None,
            },
        }
    }
}

/// Fields only some commands use. A malformed value is dropped here and
/// reported by the command that needs it.
#[derive(Deserialize)]
struct Manifest {
    version: Option<String>,
    #[serde(default)]
    author: Option<Value>,
    #[serde(default)]
    homepage: Option<Value>,
    #[serde(default)]
    repository: Option<Value>,
}

fn optional<T: DeserializeOwned>(name: &str, value: Option<Value>) -> Option<T> {
    let value = value.filter(|v| !v.is_null())?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("Ignoring \"{}\" in package.json: {}", name, e);
            None
        }
    }
}

/// Parsed project metadata.
#[derive(Debug, Clone)]
pub struct Project {
    pub path: PathBuf,
    pub version: String,
    pub author: Option<Author>,
    pub homepage: Option<String>,
    pub repository: Option<Repository>,
    fields: Map<String, Value>,
}

impl Project {
    /// Read and parse a package.json file.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    /// Parse package.json content. `path` is only used in error messages.
    pub fn from_json(content: &str, path: &Path) -> Result<Self, MetadataError> {
        let invalid = |source| MetadataError::InvalidJson {
            path: path.to_path_buf(),
            source,
        };

        let fields: Map<String, Value> = serde_json::from_str(content).map_err(invalid)?;
        let manifest: Manifest =
            serde_json::from_value(Value::Object(fields.clone())).map_err(invalid)?;

        let version = manifest.version.ok_or_else(|| MetadataError::MissingVersion {
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            version,
            author: optional("author", manifest.author),
            homepage: optional::<String>("homepage", manifest.homepage).filter(|h| !h.is_empty()),
            repository: optional("repository", manifest.repository),
            fields,
        })
    }

    /// Look up a top-level scalar field by name, rendered as a string.
    pub fn field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Display name of the project owner, used to hide self-attribution.
    pub fn owner_name(&self) -> Option<String> {
        self.author
            .as_ref()
            .map(Author::display_name)
            .filter(|name| !name.is_empty())
    }
}
