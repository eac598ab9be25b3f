//! Typed field values
//!
//! This module defines:
//! - FieldValue: tagged union for every value a decoded field can hold
//! - CHOICE_NULL: the literal `"null"` sentinel for unresolved choice values
//!
//! The union replaces an untyped per-field object map so that codec dispatch
//! is exhaustive and checked at compile time.
//!
//! ## The `"null"` sentinel
//!
//! Choice kinds never degrade to [`FieldValue::Null`] when a fragment is
//! present but unresolvable: they store `Choice("null")` instead. Known
//! caller paths compare against that literal, so it must stay distinguishable
//! from true absence. An empty multi-choice value also yields the sentinel,
//! not an empty list.

use crate::link::ArtifactLink;
use crate::step::StepDefinition;
use chrono::NaiveDateTime;
use std::fmt;

/// Literal stored for unresolved or empty choice values
pub const CHOICE_NULL: &str = "null";

/// A decoded field value
///
/// Lists render with `;` separators in the `Display` form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent or unparseable value
    Null,
    /// Integer field value
    Int(i64),
    /// Float field value
    Float(f64),
    /// Plain or rich text value (rich text arrives already stripped)
    Text(String),
    /// Resolved label of a single-choice field, or the `"null"` sentinel
    Choice(String),
    /// Resolved labels of a multi-choice field (`"null"` entries possible)
    MultiChoice(Vec<String>),
    /// Date-time value without offset
    Date(NaiveDateTime),
    /// Artifact links or cross-references
    Links(Vec<ArtifactLink>),
    /// Test-step definitions
    Steps(Vec<StepDefinition>),
}

impl FieldValue {
    /// The choice sentinel value, `Choice("null")`
    pub fn choice_null() -> Self {
        FieldValue::Choice(CHOICE_NULL.to_string())
    }

    /// Variant name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "Null",
            FieldValue::Int(_) => "Int",
            FieldValue::Float(_) => "Float",
            FieldValue::Text(_) => "Text",
            FieldValue::Choice(_) => "Choice",
            FieldValue::MultiChoice(_) => "MultiChoice",
            FieldValue::Date(_) => "Date",
            FieldValue::Links(_) => "Links",
            FieldValue::Steps(_) => "Steps",
        }
    }

    /// True absence (not the choice sentinel)
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Whether this is the `"null"` choice sentinel
    pub fn is_choice_null(&self) -> bool {
        matches!(self, FieldValue::Choice(label) if label == CHOICE_NULL)
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Get as &str if this is a Text or Choice value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) | FieldValue::Choice(value) => Some(value),
            _ => None,
        }
    }

    /// Get the label list if this is a MultiChoice value
    pub fn as_labels(&self) -> Option<&[String]> {
        match self {
            FieldValue::MultiChoice(labels) => Some(labels),
            _ => None,
        }
    }

    /// Get the date if this is a Date value
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the link list if this is a Links value
    pub fn as_links(&self) -> Option<&[ArtifactLink]> {
        match self {
            FieldValue::Links(links) => Some(links),
            _ => None,
        }
    }

    /// Get the step list if this is a Steps value
    pub fn as_steps(&self) -> Option<&[StepDefinition]> {
        match self {
            FieldValue::Steps(steps) => Some(steps),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Text(value) | FieldValue::Choice(value) => f.write_str(value),
            FieldValue::MultiChoice(labels) => f.write_str(&labels.join(";")),
            FieldValue::Date(value) => write!(f, "{}", value.format("%m/%d/%Y %H:%M:%S")),
            FieldValue::Links(links) => {
                let ids: Vec<String> = links.iter().map(ToString::to_string).collect();
                f.write_str(&ids.join(";"))
            }
            FieldValue::Steps(steps) => write!(f, "{} step(s)", steps.len()),
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Date(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(labels: Vec<String>) -> Self {
        FieldValue::MultiChoice(labels)
    }
}

impl From<Vec<ArtifactLink>> for FieldValue {
    fn from(links: Vec<ArtifactLink>) -> Self {
        FieldValue::Links(links)
    }
}

impl From<Vec<StepDefinition>> for FieldValue {
    fn from(steps: Vec<StepDefinition>) -> Self {
        FieldValue::Steps(steps)
    }
}
