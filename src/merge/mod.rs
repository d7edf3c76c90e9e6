use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;

use crate::error::Result;
use crate::model::{Record, ReferenceTable};

/// Column shared by both reference sheets.
pub const JOIN_COLUMN: &str = "Reference Id";
/// Column holding the `_id` of the article a reference belongs to.
pub const ARTICLE_COLUMN: &str = "Article Id";
/// Column ordering the reviews of one article; the highest one wins.
pub const ORDER_COLUMN: &str = "Row";
/// Document field matched against [`ARTICLE_COLUMN`].
pub const ARTICLE_ID_FIELD: &str = "_id";

/// Full outer join of two tables on the column named `on`.
///
/// Left rows keep their order and are repeated once per matching right row.
/// Right rows matching nothing are appended afterwards with `null` left
/// columns. Null keys never match. Other column names present on both sides
/// get `_x` and `_y` suffixes.
pub fn outer_join(left: &ReferenceTable, right: &ReferenceTable, on: &str) -> Result<ReferenceTable> {
    let left_key = left.require_column(on)?;
    let right_key = right.require_column(on)?;

    let right_extra: Vec<usize> = (0..right.columns.len())
        .filter(|&idx| idx != right_key)
        .collect();

    let mut columns: Vec<String> = left
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let shared = idx != left_key
                && right_extra.iter().any(|&r| &right.columns[r] == column);
            if shared { format!("{column}_x") } else { column.clone() }
        })
        .collect();
    columns.extend(right_extra.iter().map(|&idx| {
        let column = &right.columns[idx];
        if left.column_index(column).is_some() {
            format!("{column}_y")
        } else {
            column.clone()
        }
    }));

    let mut right_by_key: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, row) in right.rows.iter().enumerate() {
        if let Some(key) = row.get(right_key).and_then(key_text) {
            right_by_key.entry(key).or_default().push(idx);
        }
    }

    let mut joined = ReferenceTable::new(
        format!("{}+{}", left.sheet_name, right.sheet_name),
        columns,
    );
    let mut right_matched = vec![false; right.rows.len()];

    for left_row in &left.rows {
        let matches = left_row
            .get(left_key)
            .and_then(key_text)
            .and_then(|key| right_by_key.get(&key));
        match matches {
            Some(indices) => {
                for &right_idx in indices {
                    right_matched[right_idx] = true;
                    let right_row = &right.rows[right_idx];
                    let mut row = left_row.clone();
                    row.extend(right_extra.iter().map(|&idx| cell(right_row, idx)));
                    joined.rows.push(row);
                }
            }
            None => {
                let mut row = left_row.clone();
                row.extend(right_extra.iter().map(|_| Value::Null));
                joined.rows.push(row);
            }
        }
    }

    for (right_idx, right_row) in right.rows.iter().enumerate() {
        if right_matched[right_idx] {
            continue;
        }
        let mut row: Vec<Value> = (0..left.columns.len())
            .map(|idx| {
                if idx == left_key {
                    cell(right_row, right_key)
                } else {
                    Value::Null
                }
            })
            .collect();
        row.extend(right_extra.iter().map(|&idx| cell(right_row, idx)));
        joined.rows.push(row);
    }

    Ok(joined)
}

/// Merges the reference row describing the record's article into `record`.
///
/// Among rows whose [`ARTICLE_COLUMN`] equals the record's `_id`, the one with
/// the greatest numeric [`ORDER_COLUMN`] is chosen, the first on ties. Its
/// columns are inserted under [`normalize_column`] names. Without a match
/// the same fields are inserted as `null` and `false` is returned.
pub fn match_article(record: &mut Record, reference: &ReferenceTable) -> Result<bool> {
    let article_column = reference.require_column(ARTICLE_COLUMN)?;
    let order_column = reference.require_column(ORDER_COLUMN)?;
    let article_id = record.get(ARTICLE_ID_FIELD).and_then(key_text);

    let mut best: Option<(&Vec<Value>, Option<f64>)> = None;
    if let Some(article_id) = &article_id {
        for row in &reference.rows {
            if row.get(article_column).and_then(key_text).as_ref() != Some(article_id) {
                continue;
            }
            let order = row.get(order_column).and_then(order_value);
            let replace = match &best {
                None => true,
                Some((_, current)) => compare_order(order, *current) == Ordering::Greater,
            };
            if replace {
                best = Some((row, order));
            }
        }
    }

    let matched = best.is_some();
    for (idx, column) in reference.columns.iter().enumerate() {
        let value = best
            .map(|(row, _)| cell(row, idx))
            .unwrap_or(Value::Null);
        record.insert(normalize_column(column), value);
    }

    Ok(matched)
}

/// Field name used for a reference column inside a record.
pub fn normalize_column(column: &str) -> String {
    column.to_lowercase().replace(' ', "_")
}

fn cell(row: &[Value], idx: usize) -> Value {
    row.get(idx).cloned().unwrap_or(Value::Null)
}

/// Text used to compare identifiers across sources.
fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn order_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

// Missing orders rank below every number.
fn compare_order(lhs: Option<f64>, rhs: Option<f64>) -> Ordering {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
