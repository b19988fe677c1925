use crate::error::{CliError, Result};
use hescore::core::document::Document;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Reads a JSON-encoded element tree from `path`.
pub fn read_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)?;
    let document: Document =
        serde_json::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    debug!(root = %document.root().name, "Parsed input document.");
    Ok(document)
}

/// Writes `value` as JSON to `path`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>, pretty: bool) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    match path {
        Some(path) => std::fs::write(path, json)?,
        None => std::io::stdout().lock().write_all(json.as_bytes())?,
    }
    Ok(())
}
