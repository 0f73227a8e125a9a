//! Resource loading from files, directories, and stdin.
//!
//! YAML sources may hold several documents; `.json` files are read as a stream
//! of JSON values. Documents of a `*List` kind (e.g. `v1/List`) are flattened
//! into their items. Nothing here looks at kinds beyond that.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::InputResource;

/// Source name used for documents read from standard input.
pub const STDIN_SOURCE: &str = "<stdin>";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in {source_name}: {source}")]
    Yaml {
        source_name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON in {source_name}: {source}")]
    Json {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load every input in order. `-` reads standard input.
pub fn load_inputs<S: AsRef<str>>(
    inputs: &[S],
    recursive: bool,
) -> Result<Vec<InputResource>, LoadError> {
    let mut resources = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input == "-" {
            resources.extend(load_reader(STDIN_SOURCE, std::io::stdin())?);
        } else {
            resources.extend(load_path(Path::new(input), recursive)?);
        }
    }
    Ok(resources)
}

/// Load a file, or the manifest files of a directory.
///
/// Directory entries are visited in file name order; subdirectories are only
/// entered when `recursive` is set.
pub fn load_path(path: &Path, recursive: bool) -> Result<Vec<InputResource>, LoadError> {
    let read_err = |source: std::io::Error| LoadError::Read { path: path.to_path_buf(), source };

    if !path.is_dir() {
        let body = fs::read_to_string(path).map_err(read_err)?;
        let source_name = path.display().to_string();
        return if is_json(path) {
            parse_json_documents(&source_name, &body)
        } else {
            parse_documents(&source_name, &body)
        };
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(path)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(read_err)?;
    entries.sort();

    let mut resources = Vec::new();
    for entry in entries {
        if entry.is_dir() {
            if recursive {
                resources.extend(load_path(&entry, recursive)?);
            }
            continue;
        }
        let ext = entry.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if !matches!(ext, "yaml" | "yml" | "json") {
            debug!(path = %entry.display(), "skipping non-manifest file");
            continue;
        }
        resources.extend(load_path(&entry, recursive)?);
    }
    Ok(resources)
}

/// Read a YAML stream from any reader.
pub fn load_reader<R: Read>(
    source_name: &str,
    mut reader: R,
) -> Result<Vec<InputResource>, LoadError> {
    let mut body = String::new();
    reader.read_to_string(&mut body).map_err(|source| LoadError::Read {
        path: PathBuf::from(source_name),
        source,
    })?;
    parse_documents(source_name, &body)
}

/// Parse a multi-document YAML stream. Empty documents are skipped.
pub fn parse_documents(source_name: &str, body: &str) -> Result<Vec<InputResource>, LoadError> {
    let mut values = Vec::new();
    for document in serde_yaml::Deserializer::from_str(body) {
        let value = Value::deserialize(document).map_err(|source| LoadError::Yaml {
            source_name: source_name.to_string(),
            source,
        })?;
        values.push(value);
    }
    Ok(into_resources(source_name, values))
}

/// Parse a stream of JSON values (usually a single object or a `List`).
pub fn parse_json_documents(
    source_name: &str,
    body: &str,
) -> Result<Vec<InputResource>, LoadError> {
    let values = serde_json::Deserializer::from_str(body)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| LoadError::Json { source_name: source_name.to_string(), source })?;
    Ok(into_resources(source_name, values))
}

fn into_resources(source_name: &str, values: Vec<Value>) -> Vec<InputResource> {
    let mut flat = Vec::new();
    for value in values {
        flatten_into(value, &mut flat);
    }
    debug!(source = source_name, documents = flat.len(), "loaded documents");
    flat.into_iter()
        .enumerate()
        .map(|(index, value)| InputResource::new(source_name, index, value))
        .collect()
}

/// Expand `*List` documents into their items; drop empty documents.
fn flatten_into(value: Value, out: &mut Vec<Value>) {
    if value.is_null() {
        return;
    }
    let is_list = value.get("kind").and_then(Value::as_str).is_some_and(|k| k.ends_with("List"));
    if is_list {
        if let Some(Value::Sequence(items)) = value.get("items") {
            for item in items.clone() {
                flatten_into(item, out);
            }
            return;
        }
    }
    out.push(value);
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}
