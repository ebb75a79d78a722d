//! Interactive review of the changes file in the user's editor.

use std::env;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::EditorError;

/// Editors tried in order when neither VISUAL nor EDITOR is set.
const FALLBACK_EDITORS: &[&str] = &["vi", "nano", "notepad"];

/// Find the editor command line: $VISUAL, then $EDITOR, then a known editor on PATH.
pub fn resolve_editor() -> Result<String, EditorError> {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .or_else(|| {
            FALLBACK_EDITORS
                .iter()
                .find(|editor| which::which(editor).is_ok())
                .map(|editor| editor.to_string())
        })
        .ok_or(EditorError::NotFound)
}

/// Open `path` in the editor and wait for it to exit.
///
/// Returns whether the editor exited successfully. Editor commands may carry
/// arguments, e.g. `code --wait`.
pub fn open(path: &Path) -> Result<bool, EditorError> {
    let editor = resolve_editor()?;
    run_editor(&editor, path)
}

fn run_editor(editor: &str, path: &Path) -> Result<bool, EditorError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(EditorError::NotFound)?;

    debug!(editor, "Opening {}", path.display());
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|source| EditorError::Spawn {
            editor: editor.to_string(),
            source,
        })?;

    Ok(status.success())
}
