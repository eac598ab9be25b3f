//! Core types for the forgelink tracker client
//!
//! This crate defines the foundational types used throughout the system:
//! - FieldKind: semantic field type, resolved from the wire type tag
//! - EnumEntry / TrackerField / TrackerStructure: tracker schema
//! - ArtifactLink: direct and cross-reference links between artifacts
//! - StepDefinition: one test-step record
//! - FieldValue: tagged union for decoded field values
//! - ArtifactRecord: one artifact's decoded data
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod link;
pub mod record;
pub mod step;
pub mod structure;
pub mod value;

// Re-export commonly used types
pub use error::{Error, Result};
pub use field::{EnumEntry, FieldKind, TrackerField};
pub use link::ArtifactLink;
pub use record::{ArtifactRecord, INVALID_ARTIFACT_ID};
pub use step::StepDefinition;
pub use structure::TrackerStructure;
pub use value::{FieldValue, CHOICE_NULL};
