use serde_json::{Map, Value};

use crate::model::Record;

/// Separator placed between the keys of nested objects.
pub const KEY_SEPARATOR: char = '.';

/// Flattens nested objects of an article document into dotted keys.
///
/// Keys are emitted one nesting level at a time: every non-object value at
/// depth one first, in document order, then those at depth two, and so on.
/// Arrays are kept as-is and empty objects contribute no keys.
pub fn flatten_document(document: &Map<String, Value>) -> Record {
    let mut flat = Record::new();
    let mut level: Vec<(String, &Value)> = document
        .iter()
        .map(|(key, value)| (key.clone(), value))
        .collect();

    while !level.is_empty() {
        let mut nested = Vec::new();
        for (key, value) in level {
            match value {
                Value::Object(children) => nested.extend(
                    children
                        .iter()
                        .map(|(child, value)| (format!("{key}{KEY_SEPARATOR}{child}"), value)),
                ),
                other => {
                    flat.insert(key, other.clone());
                }
            }
        }
        level = nested;
    }

    flat
}
