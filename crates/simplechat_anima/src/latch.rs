//! Per-field lock state.

use crate::AnimaField;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Caller controls for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldControl {
    /// Keep the latched value even when the JSON changes
    pub lock: bool,
    /// Manual value; wins whenever it is non-blank
    pub override_value: String,
}

impl FieldControl {
    /// An unlocked field with no override.
    pub fn follow() -> Self {
        Self::default()
    }

    /// A locked field with no override.
    pub fn locked() -> Self {
        Self {
            lock: true,
            override_value: String::new(),
        }
    }
}

/// Latched values for locked fields.
///
/// Unlocking a field forgets its latch, so the next lock captures whatever
/// the JSON holds at that moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatchState {
    latched: HashMap<AnimaField, String>,
}

impl LatchState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every latch.
    pub fn reset(&mut self) {
        self.latched.clear();
    }

    /// The value latched for `field`, if any.
    pub fn get(&self, field: AnimaField) -> Option<&str> {
        self.latched.get(&field).map(String::as_str)
    }

    /// Number of latched fields.
    pub fn len(&self) -> usize {
        self.latched.len()
    }

    /// Whether no field is latched.
    pub fn is_empty(&self) -> bool {
        self.latched.is_empty()
    }

    /// Resolves one field against the current JSON value.
    ///
    /// - unlocked: override, else JSON value, else `default`; the latch is cleared
    /// - locked with override: the override is latched and returned
    /// - locked without latch: the JSON value (or `default`) is latched
    /// - locked with latch: the latch is returned unchanged
    pub fn resolve(
        &mut self,
        field: AnimaField,
        json_value: &str,
        control: &FieldControl,
        default: &str,
    ) -> String {
        let manual = control.override_value.trim();

        if !control.lock {
            self.latched.remove(&field);
            return first_non_empty([manual, json_value.trim(), default]);
        }

        if !manual.is_empty() {
            debug!(field = %field, "Latching override");
            self.latched.insert(field, manual.to_string());
            return manual.to_string();
        }

        self.latched
            .entry(field)
            .or_insert_with(|| {
                debug!(field = %field, "Latching current value");
                first_non_empty([json_value.trim(), default])
            })
            .clone()
    }
}

fn first_non_empty<const N: usize>(candidates: [&str; N]) -> String {
    candidates
        .into_iter()
        .find(|c| !c.is_empty())
        .unwrap_or_default()
        .to_string()
}
