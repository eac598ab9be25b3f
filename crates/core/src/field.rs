//! Field schema types
//!
//! This module defines:
//! - FieldKind: semantic type of a tracker field, derived from the wire tag
//! - EnumEntry: one id/label pair of a choice field
//! - TrackerField: schema descriptor for one field of a tracker
//!
//! The wire-tag table is loaded once, process-wide, and is read-only
//! thereafter. Resolution is a total function: unrecognized tags map to
//! [`FieldKind::Unknown`], never to an error.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Semantic type of a tracker field
///
/// Every wire type tag maps to exactly one kind. Tags the registry does not
/// know resolve to `Unknown`; such fields are silently skipped by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Artifact id assigned by the service (`aid`)
    Identifier,
    /// 64-bit integer (`int`)
    Integer,
    /// Floating point number (`float`)
    Float,
    /// Single-line string (`string`)
    PlainString,
    /// Multi-line, possibly HTML-bearing text (`text`)
    RichText,
    /// Select-box with one active entry (`sb`)
    SingleChoice,
    /// Multi-select-box (`msb`)
    MultipleChoice,
    /// Date and time (`date`)
    DateTime,
    /// Links to other artifacts (`art_link`)
    ArtifactLinks,
    /// Cross-references of the form `NAME#id` (`cross`)
    CrossReference,
    /// Radio buttons, one active entry (`rb`)
    Radio,
    /// Checkbox group (`cb`)
    MultiCheckbox,
    /// Submission date, server-managed (`subon`)
    CreatedOn,
    /// Last update date, server-managed (`lud`)
    UpdatedOn,
    /// Submitting user, server-managed (`subby`)
    CreatedBy,
    /// Last updating user, server-managed (`luby`)
    UpdatedBy,
    /// Test step definitions (`ttmstepdef`)
    StepDefinitions,
    /// File attachments (`file`)
    File,
    /// Anything the registry does not know
    Unknown,
}

static WIRE_TAGS: Lazy<HashMap<&'static str, FieldKind>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert("int", FieldKind::Integer);
    table.insert("aid", FieldKind::Identifier);
    table.insert("float", FieldKind::Float);
    table.insert("string", FieldKind::PlainString);
    table.insert("text", FieldKind::RichText);
    table.insert("sb", FieldKind::SingleChoice);
    table.insert("msb", FieldKind::MultipleChoice);
    table.insert("rb", FieldKind::Radio);
    table.insert("cb", FieldKind::MultiCheckbox);
    table.insert("date", FieldKind::DateTime);
    table.insert("art_link", FieldKind::ArtifactLinks);
    table.insert("cross", FieldKind::CrossReference);
    table.insert("subon", FieldKind::CreatedOn);
    table.insert("subby", FieldKind::CreatedBy);
    table.insert("lud", FieldKind::UpdatedOn);
    table.insert("luby", FieldKind::UpdatedBy);
    table.insert("ttmstepdef", FieldKind::StepDefinitions);
    table.insert("file", FieldKind::File);
    table
});

impl FieldKind {
    /// Resolve a wire type tag to its kind
    ///
    /// Total function: unknown tags resolve to `Unknown`.
    pub fn from_wire_tag(tag: &str) -> FieldKind {
        WIRE_TAGS.get(tag).copied().unwrap_or(FieldKind::Unknown)
    }

    /// Whether values of this kind are drawn from an enumerated choice list
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            FieldKind::SingleChoice
                | FieldKind::MultipleChoice
                | FieldKind::Radio
                | FieldKind::MultiCheckbox
        )
    }

    /// Whether the service owns this field (never sent on writes)
    pub fn is_server_managed(self) -> bool {
        matches!(
            self,
            FieldKind::Identifier
                | FieldKind::CreatedOn
                | FieldKind::CreatedBy
                | FieldKind::UpdatedOn
                | FieldKind::UpdatedBy
        )
    }
}

/// One allowed value of a choice field
///
/// Identity is `id`; `label` is the human-facing value the typed API trades
/// in. Callers pass and receive labels, never ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    /// Service-side id of the entry
    pub id: i64,
    /// Human-facing label
    pub label: String,
}

/// Schema descriptor for one field of a tracker
///
/// Immutable after construction from the schema JSON. `choices` is populated
/// only for choice-like kinds; other kinds carry an empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerField {
    /// Field id, unique within a tracker structure
    #[serde(rename = "field_id")]
    pub id: i64,
    /// Machine name used to address the field
    #[serde(default)]
    pub name: String,
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Raw wire type tag (e.g. `sb`, `int`, `art_link`)
    #[serde(rename = "type")]
    pub wire_type: String,
    /// Allowed values for choice-like kinds
    #[serde(rename = "values", default, deserialize_with = "lenient_choices")]
    pub choices: Vec<EnumEntry>,
}

impl TrackerField {
    /// Semantic kind, derived from the wire type tag
    pub fn kind(&self) -> FieldKind {
        FieldKind::from_wire_tag(&self.wire_type)
    }

    /// Look up a choice entry by its service-side id
    pub fn choice_by_id(&self, id: i64) -> Option<&EnumEntry> {
        self.choices.iter().find(|entry| entry.id == id)
    }

    /// Look up a choice entry by its label (case-sensitive)
    pub fn choice_by_label(&self, label: &str) -> Option<&EnumEntry> {
        self.choices.iter().find(|entry| entry.label == label)
    }
}

/// Deserialize the schema's `values` array, tolerating `null` and entries
/// that are not id/label pairs (the service reuses the key for other shapes).
fn lenient_choices<'de, D>(deserializer: D) -> std::result::Result<Vec<EnumEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    let mut entries = Vec::new();
    for item in raw.unwrap_or_default() {
        let id = item.get("id").and_then(serde_json::Value::as_i64);
        let label = item.get("label").and_then(serde_json::Value::as_str);
        if let (Some(id), Some(label)) = (id, label) {
            entries.push(EnumEntry {
                id,
                label: label.to_string(),
            });
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ====================================================================
    // Registry resolution
    // ====================================================================

    #[test]
    fn test_every_known_tag_resolves() {
        let expected = [
            ("int", FieldKind::Integer),
            ("aid", FieldKind::Identifier),
            ("float", FieldKind::Float),
            ("string", FieldKind::PlainString),
            ("text", FieldKind::RichText),
            ("sb", FieldKind::SingleChoice),
            ("msb", FieldKind::MultipleChoice),
            ("rb", FieldKind::Radio),
            ("cb", FieldKind::MultiCheckbox),
            ("date", FieldKind::DateTime),
            ("art_link", FieldKind::ArtifactLinks),
            ("cross", FieldKind::CrossReference),
            ("subon", FieldKind::CreatedOn),
            ("subby", FieldKind::CreatedBy),
            ("lud", FieldKind::UpdatedOn),
            ("luby", FieldKind::UpdatedBy),
            ("ttmstepdef", FieldKind::StepDefinitions),
            ("file", FieldKind::File),
        ];
        for (tag, kind) in expected {
            assert_eq!(FieldKind::from_wire_tag(tag), kind, "tag {tag}");
        }
    }

    #[test]
    fn test_unknown_tag_resolves_to_unknown() {
        assert_eq!(FieldKind::from_wire_tag("bogus"), FieldKind::Unknown);
        assert_eq!(FieldKind::from_wire_tag(""), FieldKind::Unknown);
        // Case matters on the wire
        assert_eq!(FieldKind::from_wire_tag("SB"), FieldKind::Unknown);
    }

    #[test]
    fn test_kind_classification() {
        assert!(FieldKind::SingleChoice.is_choice());
        assert!(FieldKind::MultiCheckbox.is_choice());
        assert!(!FieldKind::Integer.is_choice());
        assert!(FieldKind::CreatedOn.is_server_managed());
        assert!(FieldKind::Identifier.is_server_managed());
        assert!(!FieldKind::DateTime.is_server_managed());
    }

    // ====================================================================
    // TrackerField deserialization
    // ====================================================================

    fn field_from(json: &str) -> TrackerField {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_field_from_schema_json() {
        let field = field_from(
            r#"{"field_id": 24699, "label": "Status", "name": "status", "type": "sb",
                "values": [{"id": 1, "label": "open"}, {"id": 2, "label": "closed"}]}"#,
        );
        assert_eq!(field.id, 24699);
        assert_eq!(field.name, "status");
        assert_eq!(field.kind(), FieldKind::SingleChoice);
        assert_eq!(field.choices.len(), 2);
        assert_eq!(field.choice_by_id(2).unwrap().label, "closed");
        assert_eq!(field.choice_by_label("open").unwrap().id, 1);
    }

    #[test]
    fn test_field_without_values_key() {
        let field = field_from(r#"{"field_id": 10, "name": "effort", "type": "int"}"#);
        assert_eq!(field.kind(), FieldKind::Integer);
        assert!(field.choices.is_empty());
    }

    #[test]
    fn test_field_with_null_values() {
        let field = field_from(r#"{"field_id": 10, "name": "due", "type": "date", "values": null}"#);
        assert!(field.choices.is_empty());
    }

    #[test]
    fn test_field_with_malformed_choice_entries() {
        // Entries missing an id or a label are skipped, not fatal.
        let field = field_from(
            r#"{"field_id": 7, "name": "sev", "type": "rb",
                "values": [{"id": 5, "label": "low"}, {"label": "orphan"}, {"id": 9}, 12]}"#,
        );
        assert_eq!(field.choices.len(), 1);
        assert_eq!(field.choices[0].label, "low");
    }

    #[test]
    fn test_choice_lookup_is_case_sensitive() {
        let field = field_from(
            r#"{"field_id": 1, "name": "s", "type": "sb", "values": [{"id": 1, "label": "Open"}]}"#,
        );
        assert!(field.choice_by_label("Open").is_some());
        assert!(field.choice_by_label("open").is_none());
    }

    #[test]
    fn test_unknown_wire_type_on_field() {
        let field = field_from(r#"{"field_id": 3, "name": "x", "type": "burndown"}"#);
        assert_eq!(field.kind(), FieldKind::Unknown);
    }
}
