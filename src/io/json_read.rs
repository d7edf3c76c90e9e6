use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{LoadError, Result};

/// Object path leading to the article documents inside the API response.
pub const DOCUMENTS_PATH: [&str; 2] = ["response", "docs"];

/// Reads the API response at `path` and returns its article documents.
pub fn read_documents(path: &Path) -> Result<Vec<Map<String, Value>>> {
    if !path.exists() {
        return Err(LoadError::MissingInput(path.to_path_buf()));
    }
    let source = fs::read(path)?;
    let json: Value = serde_json::from_slice(&source)?;
    extract_documents(json)
}

/// Walks [`DOCUMENTS_PATH`] and checks that every document is an object.
pub fn extract_documents(json: Value) -> Result<Vec<Map<String, Value>>> {
    let mut current = json;
    let mut walked = Vec::with_capacity(DOCUMENTS_PATH.len());
    for key in DOCUMENTS_PATH {
        walked.push(key);
        current = match current {
            Value::Object(mut object) => object.remove(key).ok_or_else(|| {
                LoadError::InvalidResponse(format!("missing key '{}'", walked.join(".")))
            })?,
            other => {
                return Err(LoadError::InvalidResponse(format!(
                    "expected object above '{}', found {}",
                    walked.join("."),
                    kind_of(&other)
                )));
            }
        };
    }

    let path = DOCUMENTS_PATH.join(".");
    match current {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(document) => Ok(document),
                other => Err(LoadError::InvalidResponse(format!(
                    "{path}[{idx}] is {}, expected object",
                    kind_of(&other)
                ))),
            })
            .collect(),
        other => Err(LoadError::InvalidResponse(format!(
            "'{path}' is {}, expected array",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
