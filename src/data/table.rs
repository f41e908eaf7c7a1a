//! Indexed table: rows in file order plus a key-field index for O(1) lookup.
//! Keys are not assumed unique; duplicate keys accumulate in one bucket.

use std::collections::HashMap;

use crate::data::record::Record;

/// Ordered rows plus a secondary index from one designated key field's value
/// to the rows carrying it. The key field is fixed at construction.
#[derive(Debug, Clone)]
pub struct Table {
    key_field: &'static str,
    rows: Vec<Record>,
    index: HashMap<String, Vec<usize>>,
}

impl Table {
    pub fn new(key_field: &'static str) -> Self {
        Table {
            key_field,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn key_field(&self) -> &'static str {
        self.key_field
    }

    /// Append a row and index it under its key-field value. A row missing the
    /// key column is indexed under the empty string so the row/index
    /// invariant holds for malformed data too.
    pub fn insert(&mut self, record: Record) {
        let key = record.get(self.key_field).unwrap_or("").to_string();
        let position = self.rows.len();
        self.rows.push(record);
        self.index.entry(key).or_default().push(position);
    }

    /// All rows sharing `key`, in insertion order. Unknown keys yield an
    /// empty result, never an error.
    pub fn lookup(&self, key: &str) -> Vec<&Record> {
        self.index
            .get(key)
            .map(|positions| positions.iter().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default()
    }

    /// First row for `key`, the common case for effectively-unique keys.
    pub fn first(&self, key: &str) -> Option<&Record> {
        self.index
            .get(key)
            .and_then(|positions| positions.first())
            .map(|&i| &self.rows[i])
    }

    /// Every row in insertion (file) order.
    pub fn all(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
