use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{LoadError, Result};

/// A single merged article. Keys keep their insertion order.
pub type Record = Map<String, Value>;

/// Tabular data read from one reference sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    /// Cell values, aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl ReferenceTable {
    pub fn new(sheet_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Like [`column_index`](Self::column_index) but reports absent columns.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| {
            LoadError::InvalidWorkbook(format!(
                "sheet '{}' has no column '{name}'",
                self.sheet_name
            ))
        })
    }
}

/// Output of [`load`](crate::loader::load): merged records plus the field
/// names of the first record.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoadedDataset {
    pub schema: Vec<String>,
    pub records: Vec<Record>,
}

impl LoadedDataset {
    pub fn new(records: Vec<Record>) -> Self {
        let schema = records
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default();
        Self { schema, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every field appearing in any record: the schema first, then fields
    /// only later records carry, in order of first appearance.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = self.schema.clone();
        for record in &self.records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }

    /// Splits the records into consecutive slices of at most `batch_size`.
    pub fn batches(&self, batch_size: usize) -> Result<Batches<'_>> {
        if batch_size == 0 {
            return Err(LoadError::InvalidBatchSize);
        }
        Ok(Batches {
            inner: self.records.chunks(batch_size),
        })
    }
}

/// Iterator returned by [`LoadedDataset::batches`].
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    inner: std::slice::Chunks<'a, Record>,
}

impl<'a> Iterator for Batches<'a> {
    type Item = &'a [Record];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Batches<'_> {}
