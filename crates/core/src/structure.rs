//! Tracker structure: the schema for one tracker

use crate::field::TrackerField;
use serde::Deserialize;

/// Schema of one tracker: its id, item name and ordered field list
///
/// Deserialized from the service's `trackers/{id}` payload. One structure is
/// fetched per tracker id per session; see the client's structure cache.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerStructure {
    /// Tracker id
    pub id: i64,
    /// Short item name of the tracker (e.g. `bug`)
    #[serde(default)]
    pub item_name: Option<String>,
    /// Fields in schema order
    #[serde(default)]
    pub fields: Vec<TrackerField>,
}

impl TrackerStructure {
    /// Look up a field by name, case-insensitively
    pub fn field_by_name(&self, name: &str) -> Option<&TrackerField> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// Look up a field by its field id
    pub fn field_by_id(&self, id: i64) -> Option<&TrackerField> {
        self.fields.iter().find(|field| field.id == id)
    }
}
