//! Encoding of typed field values into write-request fragments
//!
//! Each fragment is a JSON object carrying `field_id` plus a kind-specific
//! payload key, usable inside the `values` array of a create or update body.
//! `Ok(None)` means the field is omitted from the request: unresolvable
//! choice labels, server-managed kinds and null values are dropped rather
//! than failing the write. A value whose variant does not fit the field's
//! kind is a programming or schema-drift error and fails the single write.

use crate::html;
use forgelink_core::{Error, FieldKind, FieldValue, Result, TrackerField};
use serde_json::{json, Value as Json};

/// Format used for date-time values in write requests
///
/// Intentionally different from the read format: the service parses ISO-8601
/// on writes but renders `%m/%d/%Y %H:%M:%S` on reads.
pub const WIRE_DATE_WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Encode one typed value into a write fragment for its field
///
/// # Errors
///
/// Returns [`Error::Encode`] when the value's variant has no encoding rule
/// for the field's kind.
pub fn encode_field(field: &TrackerField, value: &FieldValue) -> Result<Option<Json>> {
    if value.is_null() {
        return Ok(None);
    }
    let fragment = match field.kind() {
        FieldKind::Integer => match value {
            FieldValue::Int(number) => Some(json!({"field_id": field.id, "value": number})),
            _ => return Err(mismatch(field, value)),
        },

        FieldKind::Float => match value {
            FieldValue::Float(number) => Some(json!({"field_id": field.id, "value": number})),
            FieldValue::Int(number) => Some(json!({"field_id": field.id, "value": number})),
            _ => return Err(mismatch(field, value)),
        },

        FieldKind::PlainString | FieldKind::RichText => match value {
            FieldValue::Text(text) | FieldValue::Choice(text) => {
                Some(json!({"field_id": field.id, "value": text}))
            }
            _ => return Err(mismatch(field, value)),
        },

        FieldKind::DateTime => match value {
            FieldValue::Date(date) => Some(json!({
                "field_id": field.id,
                "value": date.format(WIRE_DATE_WRITE_FORMAT).to_string(),
            })),
            _ => return Err(mismatch(field, value)),
        },

        FieldKind::SingleChoice | FieldKind::Radio => match value {
            FieldValue::Text(label) | FieldValue::Choice(label) => {
                encode_single_choice(field, label)
            }
            _ => return Err(mismatch(field, value)),
        },

        FieldKind::MultipleChoice | FieldKind::MultiCheckbox => match value {
            FieldValue::MultiChoice(labels) => encode_multi_choice(field, labels),
            FieldValue::Text(label) | FieldValue::Choice(label) => {
                encode_multi_choice(field, std::slice::from_ref(label))
            }
            _ => return Err(mismatch(field, value)),
        },

        FieldKind::ArtifactLinks => match value {
            FieldValue::Links(links) => {
                let entries: Vec<Json> =
                    links.iter().map(|link| json!({"id": link.id()})).collect();
                Some(json!({"field_id": field.id, "links": entries}))
            }
            _ => return Err(mismatch(field, value)),
        },

        // Encodes only the numeric id under "ref" while decode reads "ref"
        // as a string reference. Asymmetric on the wire; kept as-is.
        FieldKind::CrossReference => match value {
            FieldValue::Links(links) => {
                let entries: Vec<Json> =
                    links.iter().map(|link| json!({"ref": link.id()})).collect();
                Some(json!({"field_id": field.id, "value": entries}))
            }
            _ => return Err(mismatch(field, value)),
        },

        FieldKind::StepDefinitions => match value {
            FieldValue::Steps(steps) => {
                let entries: Vec<Json> = steps
                    .iter()
                    .map(|step| {
                        json!({
                            "id": step.id,
                            "description": step.description,
                            "description_format": content_format(&step.description),
                            "expected_results": step.expected_results,
                            "expected_results_format": content_format(&step.expected_results),
                            "rank": step.rank,
                        })
                    })
                    .collect();
                Some(json!({
                    "field_id": field.id,
                    "type": "ttmstepdef",
                    "value": entries,
                }))
            }
            _ => return Err(mismatch(field, value)),
        },

        // Server-managed or unsupported kinds are never sent.
        FieldKind::Identifier
        | FieldKind::CreatedOn
        | FieldKind::CreatedBy
        | FieldKind::UpdatedOn
        | FieldKind::UpdatedBy
        | FieldKind::File
        | FieldKind::Unknown => None,
    };
    Ok(fragment)
}

fn mismatch(field: &TrackerField, value: &FieldValue) -> Error {
    tracing::warn!(
        target: "forgelink::codec",
        field = %field.name,
        kind = ?field.kind(),
        value_type = value.type_name(),
        "no encoding rule for value/kind combination"
    );
    Error::Encode {
        field: field.name.clone(),
        kind: field.kind(),
    }
}

fn encode_single_choice(field: &TrackerField, label: &str) -> Option<Json> {
    match field.choice_by_label(label) {
        Some(choice) => Some(json!({"field_id": field.id, "bind_value_ids": [choice.id]})),
        None => {
            tracing::warn!(
                target: "forgelink::codec",
                field = %field.name,
                label,
                "label not in choice list, field omitted from request"
            );
            None
        }
    }
}

fn encode_multi_choice(field: &TrackerField, labels: &[String]) -> Option<Json> {
    let ids: Vec<i64> = labels
        .iter()
        .filter_map(|label| field.choice_by_label(label).map(|choice| choice.id))
        .collect();
    if ids.is_empty() {
        return None;
    }
    Some(json!({"field_id": field.id, "bind_value_ids": ids}))
}

fn content_format(content: &str) -> &'static str {
    if html::is_html(content) {
        "html"
    } else {
        "text"
    }
}
