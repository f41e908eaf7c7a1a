//! Row records: immutable column-name -> cell-value maps shared by every table.
//! All cells stay raw text until a consumer coerces them (see `Record::number`).

use std::collections::BTreeMap;

use serde::Serialize;

/// One row of named field values. Built once at load time, never mutated.
/// A BTreeMap keeps JSON payloads field-ordered and diffs stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            fields: BTreeMap::new(),
        }
    }

    /// Build a record from (column, value) pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Record {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw cell value, None when the column is absent from this row.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Numeric coercion for stat math: absent or unparsable cells count as 0.
    pub fn number(&self, field: &str) -> f64 {
        self.get(field)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// Shallow overlay merge: a new record with `overlay` fields winning on
    /// collision. Neither input is touched.
    pub fn merged(&self, overlay: &Record) -> Record {
        let mut fields = self.fields.clone();
        for (key, value) in &overlay.fields {
            fields.insert(key.clone(), value.clone());
        }
        Record { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::Record;

    #[test]
    fn number_coerces_absent_and_unparsable_to_zero() {
        let record = Record::from_pairs([("damage", "24"), ("ap_damage", "n/a")]);
        assert_eq!(record.number("damage"), 24.0);
        assert_eq!(record.number("ap_damage"), 0.0);
        assert_eq!(record.number("missing"), 0.0);
    }

    #[test]
    fn merged_overlay_wins_and_inputs_survive() {
        let base = Record::from_pairs([("a", "1"), ("b", "2")]);
        let overlay = Record::from_pairs([("b", "9"), ("c", "3")]);
        let merged = base.merged(&overlay);

        assert_eq!(merged.get("a"), Some("1"));
        assert_eq!(merged.get("b"), Some("9"));
        assert_eq!(merged.get("c"), Some("3"));
        assert_eq!(base.get("b"), Some("2"));
        assert_eq!(overlay.get("a"), None);
    }
}
