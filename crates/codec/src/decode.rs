//! Decoding of wire value fragments into typed field values
//!
//! One fragment of the artifact payload's `values` array is decoded per
//! schema field, dispatched on the field's kind. Decoding is total: it never
//! errors and never panics. A malformed fragment degrades the single field to
//! [`FieldValue::Null`] (the `"null"` sentinel for choice kinds) instead of
//! aborting the record.

use crate::html;
use chrono::NaiveDateTime;
use forgelink_core::{
    ArtifactLink, FieldKind, FieldValue, StepDefinition, TrackerField, CHOICE_NULL,
};
use serde_json::Value as Json;

/// Format the service uses for date-time values in read payloads (24-hour)
pub const WIRE_DATE_READ_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Decode one field's wire fragment into a typed value
///
/// `fragment` is the entry of the payload's `values` array whose `field_id`
/// matches the field, or `None` when the payload has no such entry. Returns
/// `None` for kinds that are not decoded from a value fragment (`Identifier`
/// is captured from the envelope; `File` and `Unknown` are skipped), in which
/// case the record gains no entry for the field.
pub fn decode_field(field: &TrackerField, fragment: Option<&Json>) -> Option<FieldValue> {
    let kind = field.kind();
    if matches!(
        kind,
        FieldKind::Identifier | FieldKind::File | FieldKind::Unknown
    ) {
        return None;
    }
    let value = match fragment {
        // Fragment absent entirely: the field's value is null, even for
        // choice kinds. The sentinel only applies to present-but-empty.
        None => FieldValue::Null,
        Some(fragment) => decode_present(field, kind, fragment),
    };
    Some(value)
}

fn decode_present(field: &TrackerField, kind: FieldKind, fragment: &Json) -> FieldValue {
    match kind {
        FieldKind::Integer => fragment
            .get("value")
            .and_then(Json::as_i64)
            .map(FieldValue::Int)
            .unwrap_or(FieldValue::Null),

        FieldKind::Float => fragment
            .get("value")
            .and_then(Json::as_f64)
            .map(FieldValue::Float)
            .unwrap_or(FieldValue::Null),

        FieldKind::PlainString => fragment
            .get("value")
            .and_then(Json::as_str)
            .map(|text| FieldValue::Text(text.to_string()))
            .unwrap_or(FieldValue::Null),

        FieldKind::RichText => fragment
            .get("value")
            .and_then(Json::as_str)
            .map(|text| FieldValue::Text(html::extract_text(text)))
            .unwrap_or(FieldValue::Null),

        FieldKind::SingleChoice | FieldKind::Radio => decode_single_choice(field, fragment),

        FieldKind::MultipleChoice | FieldKind::MultiCheckbox => {
            decode_multi_choice(field, fragment)
        }

        FieldKind::DateTime | FieldKind::CreatedOn | FieldKind::UpdatedOn => fragment
            .get("value")
            .and_then(Json::as_str)
            .and_then(parse_wire_datetime)
            .map(FieldValue::Date)
            .unwrap_or(FieldValue::Null),

        FieldKind::CreatedBy | FieldKind::UpdatedBy => fragment
            .get("value")
            .and_then(|user| user.get("username"))
            .and_then(Json::as_str)
            .map(|name| FieldValue::Text(name.to_string()))
            .unwrap_or(FieldValue::Null),

        FieldKind::ArtifactLinks => decode_links(fragment),

        FieldKind::CrossReference => decode_cross_references(fragment),

        FieldKind::StepDefinitions => decode_steps(fragment),

        // Filtered out by the caller before dispatch.
        FieldKind::Identifier | FieldKind::File | FieldKind::Unknown => FieldValue::Null,
    }
}

fn parse_wire_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, WIRE_DATE_READ_FORMAT).ok()
}

fn decode_single_choice(field: &TrackerField, fragment: &Json) -> FieldValue {
    let first = fragment
        .get("values")
        .and_then(Json::as_array)
        .and_then(|entries| entries.first());
    match first.and_then(|entry| entry.get("id")).and_then(Json::as_i64) {
        Some(value_id) => match field.choice_by_id(value_id) {
            Some(choice) => FieldValue::Choice(choice.label.clone()),
            None => {
                tracing::warn!(
                    target: "forgelink::codec",
                    field = %field.name,
                    value_id,
                    "choice id not present in schema"
                );
                FieldValue::choice_null()
            }
        },
        // Empty/absent values array, or an entry without a usable id.
        None => FieldValue::choice_null(),
    }
}

fn decode_multi_choice(field: &TrackerField, fragment: &Json) -> FieldValue {
    let entries = fragment.get("values").and_then(Json::as_array);
    match entries {
        // An empty selection decodes to the "null" sentinel, not to an
        // empty list. Asymmetric with the populated case; kept on purpose.
        None => FieldValue::choice_null(),
        Some(entries) if entries.is_empty() => FieldValue::choice_null(),
        Some(entries) => {
            let labels = entries
                .iter()
                .map(|entry| {
                    entry
                        .get("id")
                        .and_then(Json::as_i64)
                        .and_then(|value_id| field.choice_by_id(value_id))
                        .map(|choice| choice.label.clone())
                        .unwrap_or_else(|| CHOICE_NULL.to_string())
                })
                .collect();
            FieldValue::MultiChoice(labels)
        }
    }
}

fn decode_links(fragment: &Json) -> FieldValue {
    let mut links = Vec::new();
    for (key, reverse) in [("links", false), ("reverse_links", true)] {
        if let Some(entries) = fragment.get(key).and_then(Json::as_array) {
            for entry in entries {
                if let Some(id) = entry.get("id").and_then(Json::as_i64) {
                    links.push(if reverse {
                        ArtifactLink::reverse(id)
                    } else {
                        ArtifactLink::direct(id)
                    });
                }
            }
        }
    }
    FieldValue::Links(links)
}

fn decode_cross_references(fragment: &Json) -> FieldValue {
    let mut links = Vec::new();
    if let Some(entries) = fragment.get("value").and_then(Json::as_array) {
        for entry in entries {
            if let Some(reference) = entry.get("ref").and_then(Json::as_str) {
                let url = entry.get("url").and_then(Json::as_str).unwrap_or_default();
                links.push(ArtifactLink::cross(reference, url));
            }
        }
    }
    FieldValue::Links(links)
}

fn decode_steps(fragment: &Json) -> FieldValue {
    let mut steps = Vec::new();
    if let Some(entries) = fragment.get("value").and_then(Json::as_array) {
        for entry in entries {
            steps.push(StepDefinition {
                id: entry.get("id").and_then(Json::as_i64).unwrap_or_default(),
                description: entry
                    .get("description")
                    .and_then(Json::as_str)
                    .unwrap_or_default()
                    .to_string(),
                expected_results: entry
                    .get("expected_results")
                    .and_then(Json::as_str)
                    .unwrap_or_default()
                    .to_string(),
                rank: entry.get("rank").and_then(Json::as_i64).unwrap_or_default(),
            });
        }
    }
    FieldValue::Steps(steps)
}
