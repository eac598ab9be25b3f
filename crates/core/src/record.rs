//! Artifact records

use crate::value::FieldValue;
use std::collections::HashMap;
use std::fmt;

/// Id carried by the invalid-artifact sentinel
pub const INVALID_ARTIFACT_ID: i64 = -1;

/// One artifact's data: ids, tracker identity and decoded field values
///
/// A record is either created directly for write operations (only `id` and
/// `tracker_id` are meaningful before encode) or populated by a read. Reads
/// replace the relevant entries wholesale; nothing else mutates `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactRecord {
    /// Artifact id (`-1` marks the invalid sentinel)
    pub id: i64,
    /// Id of the owning tracker
    pub tracker_id: i64,
    /// Label of the owning tracker, filled by reads
    pub tracker_name: String,
    values: HashMap<String, FieldValue>,
}

impl ArtifactRecord {
    /// A fresh record bound to a tracker, with no id assigned yet
    pub fn new(tracker_id: i64) -> Self {
        Self {
            id: INVALID_ARTIFACT_ID,
            tracker_id,
            tracker_name: String::new(),
            values: HashMap::new(),
        }
    }

    /// The invalid-artifact sentinel (`id == -1`)
    pub fn invalid() -> Self {
        Self::new(0)
    }

    /// Whether this record has a real artifact id
    pub fn is_valid(&self) -> bool {
        self.id != INVALID_ARTIFACT_ID
    }

    /// Decoded value of a field, by name
    pub fn value(&self, field_name: &str) -> Option<&FieldValue> {
        self.values.get(field_name)
    }

    /// Decoded value rendered as a string, `None` when absent or null
    pub fn value_as_string(&self, field_name: &str) -> Option<String> {
        match self.values.get(field_name) {
            None | Some(FieldValue::Null) => None,
            Some(value) => Some(value.to_string()),
        }
    }

    /// Store a decoded value
    ///
    /// Population happens during reads; replacing an entry wholesale is the
    /// only supported mutation.
    pub fn insert_value(&mut self, field_name: impl Into<String>, value: FieldValue) {
        self.values.insert(field_name.into(), value);
    }

    /// Iterate over all stored field values
    pub fn values(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    /// Number of stored field values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field values are stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for ArtifactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[aid] = {}", self.id)?;
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();
        for name in names {
            if name != "aid" {
                writeln!(f, "[{}] = {}", name, self.values[name])?;
            }
        }
        Ok(())
    }
}
