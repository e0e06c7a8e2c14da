//! Loading and parsing of flat key/value content.
//!
//! # Responsibilities
//! - Parse `key=value` lines into a string map
//! - Merge the optional override file over the primary content

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::conf::source::KeyValueSource;

/// Reserved key naming an absolute-path secondary source whose entries
/// are merged over the primary content.
pub const OVERRIDE_FILE_KEY: &str = "dynamic.conf.file.path";

/// Error type for loading and parsing source content.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("content is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("line {line}: expected key=value, got {text:?}")]
    MalformedLine { line: usize, text: String },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse flat `key=value` lines into a map.
///
/// Blank lines and lines starting with `#` or `!` are ignored. Keys and
/// values are trimmed. A non-comment line without `=` is malformed and
/// rejects the whole content.
pub fn parse_properties(content: &[u8]) -> Result<HashMap<String, String>, LoadError> {
    let text = String::from_utf8(content.to_vec())?;
    let mut conf = HashMap::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => {
                conf.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                return Err(LoadError::MalformedLine {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }
    Ok(conf)
}

/// Load the primary resource and merge the optional override file on top.
///
/// A missing primary resource yields an empty map. The override file is
/// best-effort: a failure there is logged and the primary map is kept.
pub fn load_merged(
    source: &dyn KeyValueSource,
    logical_name: &str,
) -> Result<HashMap<String, String>, LoadError> {
    let mut conf = match source.resolve(logical_name) {
        Some(content) => parse_properties(&content)?,
        None => {
            tracing::debug!(resource = logical_name, "primary source not found, treating as empty");
            HashMap::new()
        }
    };

    if let Some(path) = conf.get(OVERRIDE_FILE_KEY).cloned() {
        match load_override(source, Path::new(&path)) {
            Ok(overrides) => {
                tracing::debug!(path = %path, entries = overrides.len(), "override file merged");
                conf.extend(overrides);
            }
            Err(e) => {
                tracing::error!(
                    path = %path,
                    error = %e,
                    "override file load failed, using primary content only"
                );
            }
        }
    }

    Ok(conf)
}

fn load_override(
    source: &dyn KeyValueSource,
    path: &Path,
) -> Result<HashMap<String, String>, LoadError> {
    let content = source.read_absolute(path)?;
    parse_properties(&content)
}
