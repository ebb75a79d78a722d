//! Install version lifecycle scripts into package.json.
//!
//! Adds `preversion`, `version` and `postversion` entries so that `npm version`
//! runs the tests, generates the changelog and publishes. Existing entries are
//! never replaced, and nothing is touched if a `version` script is defined.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::InitError;

const SCRIPT_PREVERSION: &str = "npm test";
const SCRIPT_VERSION: &str = "changes";
const SCRIPT_POSTVERSION: &str = "git push --follow-tags && npm publish";

const DEFAULT_INDENT: &str = "  ";

/// Add the lifecycle scripts to the package.json at `path`.
///
/// `changes_file` is appended as `--file <path>` to the `version` script.
/// Returns `false` without writing if a `version` script already exists.
pub fn install_scripts(path: &Path, changes_file: Option<&str>) -> Result<bool, InitError> {
    let content = std::fs::read_to_string(path).map_err(|source| InitError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(updated) = add_scripts(&content, changes_file, path)? else {
        debug!("\"version\" script already defined in {}", path.display());
        return Ok(false);
    };

    std::fs::write(path, updated).map_err(|source| InitError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(true)
}

/// Return the rewritten package.json, or `None` if a `version` script exists.
pub fn add_scripts(
    content: &str,
    changes_file: Option<&str>,
    path: &Path,
) -> Result<Option<String>, InitError> {
    let mut json: Value = serde_json::from_str(content).map_err(|source| InitError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    let package = json.as_object_mut().ok_or_else(|| InitError::NotAnObject {
        path: path.to_path_buf(),
    })?;

    let scripts = package.entry("scripts").or_insert(Value::Null);
    if !is_set(scripts) {
        *scripts = Value::Object(Map::new());
    }
    let scripts = scripts.as_object_mut().ok_or_else(|| InitError::NotAnObject {
        path: path.to_path_buf(),
    })?;

    if scripts.get("version").is_some_and(is_set) {
        return Ok(None);
    }

    let version_script = match changes_file {
        Some(file) => format!("{} --file {}", SCRIPT_VERSION, file),
        None => SCRIPT_VERSION.to_string(),
    };

    add_script(scripts, "preversion", SCRIPT_PREVERSION);
    add_script(scripts, "version", &version_script);
    add_script(scripts, "postversion", SCRIPT_POSTVERSION);

    let indent = detect_indent(content).unwrap_or_else(|| DEFAULT_INDENT.to_string());
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    json.serialize(&mut serializer)
        .map_err(|source| InitError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    // serde_json only emits valid UTF-8
    let mut output = String::from_utf8_lossy(&out).into_owned();
    output.push('\n');
    Ok(Some(output))
}

fn add_script(scripts: &mut Map<String, Value>, name: &str, source: &str) {
    if !scripts.get(name).is_some_and(is_set) {
        scripts.insert(name.to_string(), Value::String(source.to_string()));
    }
}

/// Whether a value counts as defined: `null`, `false`, `0` and `""` do not.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Detect the indentation unit of a JSON document.
///
/// Uses the most frequent change in leading whitespace between consecutive
/// non-blank lines. Returns `None` for documents without indentation.
pub fn detect_indent(content: &str) -> Option<String> {
    let mut steps: HashMap<usize, usize> = HashMap::new();
    let mut uses_tabs = false;
    let mut previous = 0;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        let leading = &line[..line.len() - line.trim_start().len()];
        if leading.starts_with('\t') {
            uses_tabs = true;
        }
        let width = leading.len();
        let step = width.abs_diff(previous);
        if step > 0 {
            *steps.entry(step).or_default() += 1;
        }
        previous = width;
    }

    // Prefer the smaller step when counts tie
    let (step, _) = steps
        .into_iter()
        .max_by(|(a_step, a_count), (b_step, b_count)| a_count.cmp(b_count).then(b_step.cmp(a_step)))?;

    let unit = if uses_tabs { "\t" } else { " " };
    Some(unit.repeat(step))
}
