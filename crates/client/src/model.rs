//! Declarative binding between typed models and tracker fields
//!
//! A model registers a static table of bindings, each tying one of its
//! attributes to a tracker field name. `hydrate` copies a record's decoded
//! values into a fresh model; `collect` gathers a model's values into the
//! name→value map the store's create/update operations take. The table is
//! plain data checked at compile time; there is no runtime reflection.

use forgelink_core::{ArtifactRecord, FieldValue};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// One attribute↔field binding of a model
pub struct Binding<T> {
    /// Tracker field name the attribute binds to
    pub field: &'static str,
    /// Whether the attribute holds artifact links
    ///
    /// Link bindings that share a field name have their links merged into
    /// one value when collected.
    pub link: bool,
    /// Copy a decoded value into the model
    pub read: fn(&mut T, &FieldValue),
    /// Produce the value to write, `None` to leave the field out
    pub write: fn(&T) -> Option<FieldValue>,
}

/// A model with a registered binding table
pub trait Mapped: Default + Sized {
    /// The model's bindings, in declaration order
    fn bindings() -> &'static [Binding<Self>];
}

/// Build a model from a record's decoded values
///
/// Bindings whose field is absent from the record keep the model's default.
pub fn hydrate<T: Mapped + 'static>(record: &ArtifactRecord) -> T {
    let mut model = T::default();
    for binding in T::bindings() {
        if let Some(value) = record.value(binding.field) {
            (binding.read)(&mut model, value);
        }
    }
    model
}

/// Gather a model's values into a name→value map for create/update
pub fn collect<T: Mapped + 'static>(model: &T) -> HashMap<String, FieldValue> {
    let mut values: HashMap<String, FieldValue> = HashMap::new();
    for binding in T::bindings() {
        let Some(value) = (binding.write)(model) else {
            continue;
        };
        if binding.link {
            match values.entry(binding.field.to_string()) {
                Entry::Occupied(mut slot) => {
                    if let (FieldValue::Links(existing), FieldValue::Links(more)) =
                        (slot.get_mut(), value)
                    {
                        existing.extend(more);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
            }
        } else {
            values.insert(binding.field.to_string(), value);
        }
    }
    values
}
