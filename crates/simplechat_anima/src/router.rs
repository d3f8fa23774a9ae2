//! JSON-to-fields router with manual overrides and latching.

use crate::{AnimaField, FieldControl, LatchState, join_pieces, text_of};
use derive_getters::Getters;
use serde_json::{Map, Value};
use simplechat_core::{VarValue, Vars};
use simplechat_error::{JsonError, JsonErrorKind};
use simplechat_json::{parse_object, strip_code_fence};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

const VAR_PREFIX: &str = "anima.";

/// Options for one routing call.
///
/// # Examples
///
/// ```
/// use simplechat_anima::{AnimaField, RouteOptions};
///
/// let options = RouteOptions::new()
///     .lock(AnimaField::Artist, true)
///     .override_field(AnimaField::Tags, "solo, smile");
/// assert!(options.control(AnimaField::Artist).lock);
/// assert!(options.strip_fence());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    strip_fence: bool,
    reset_latches: bool,
    controls: BTreeMap<AnimaField, FieldControl>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            strip_fence: true,
            reset_latches: false,
            controls: BTreeMap::new(),
        }
    }
}

impl RouteOptions {
    /// Defaults: fences stripped, latches kept, every field unlocked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to strip a code fence before parsing.
    pub fn with_strip_fence(mut self, strip: bool) -> Self {
        self.strip_fence = strip;
        self
    }

    /// Clears all latches before resolving.
    pub fn with_reset_latches(mut self, reset: bool) -> Self {
        self.reset_latches = reset;
        self
    }

    /// Sets the lock flag of `field`.
    pub fn lock(mut self, field: AnimaField, lock: bool) -> Self {
        self.controls.entry(field).or_default().lock = lock;
        self
    }

    /// Sets the manual override of `field`.
    pub fn override_field(mut self, field: AnimaField, value: impl Into<String>) -> Self {
        self.controls.entry(field).or_default().override_value = value.into();
        self
    }

    /// Replaces the control of `field`.
    pub fn with_control(mut self, field: AnimaField, control: FieldControl) -> Self {
        self.controls.insert(field, control);
        self
    }

    /// Whether a code fence is stripped.
    pub fn strip_fence(&self) -> bool {
        self.strip_fence
    }

    /// Whether latches are cleared first.
    pub fn reset_latches(&self) -> bool {
        self.reset_latches
    }

    /// Control of `field`; unlocked without override when unset.
    pub fn control(&self, field: AnimaField) -> FieldControl {
        self.controls.get(&field).cloned().unwrap_or_default()
    }
}

/// Result of one routing call.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct AnimaRoute {
    /// Resolved value per field
    fields: BTreeMap<AnimaField, String>,
    /// Rebuilt positive prompt
    positive: String,
    /// Negative prompt, equal to the resolved `neg`
    negative: String,
    /// Template variables under plain, prefixed and localized names
    vars: Vars,
    /// Incoming object with resolved fields written back
    object: Map<String, Value>,
    /// `object` pretty-printed
    json_text: String,
}

impl AnimaRoute {
    /// Resolved value of `field`.
    pub fn field(&self, field: AnimaField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or_default()
    }
}

/// Splits Anima prompt JSON into fields, holding latch state across calls.
///
/// One router instance corresponds to one place in a workflow; its latches
/// persist until [`AnimaRouter::reset`] or a call with `reset_latches`.
///
/// # Examples
///
/// ```
/// use simplechat_anima::{AnimaField, AnimaRouter, RouteOptions};
///
/// let mut router = AnimaRouter::new();
/// let locked = RouteOptions::new().lock(AnimaField::Artist, true);
///
/// let first = router.route(r#"{"artist": "@a", "tags": "solo"}"#, &locked).unwrap();
/// let second = router.route(r#"{"artist": "@b", "tags": "duo"}"#, &locked).unwrap();
///
/// assert_eq!(first.positive(), "@a, solo");
/// assert_eq!(second.field(AnimaField::Artist), "@a");
/// assert_eq!(second.field(AnimaField::Tags), "duo");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnimaRouter {
    latches: LatchState,
}

impl AnimaRouter {
    /// Router with no latches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every latch.
    pub fn reset(&mut self) {
        self.latches.reset();
    }

    /// Current latch state.
    pub fn latches(&self) -> &LatchState {
        &self.latches
    }

    /// Routes one JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] when the text is not a JSON object after all
    /// repair attempts.
    #[instrument(skip(self, json_text, options), fields(len = json_text.len()))]
    pub fn route(&mut self, json_text: &str, options: &RouteOptions) -> Result<AnimaRoute, JsonError> {
        if options.reset_latches() {
            debug!("Resetting latches");
            self.latches.reset();
        }

        let raw = if options.strip_fence() {
            strip_code_fence(json_text)?
        } else {
            json_text
        };
        let data = parse_object(raw)?;

        let fields: BTreeMap<AnimaField, String> = AnimaField::iter()
            .map(|field| {
                let json_value = source_value(&data, field);
                let resolved = self
                    .latches
                    .resolve(field, &json_value, &options.control(field), "");
                (field, resolved)
            })
            .collect();
        let value_of = |field: AnimaField| fields.get(&field).map(String::as_str).unwrap_or_default();

        let positive = join_pieces(AnimaField::POSITIVE_ORDER.iter().map(|f| value_of(*f)));
        let negative = value_of(AnimaField::Neg).to_string();

        let vars = build_vars(&fields, &positive, &negative, &data);
        let object = write_back(data, &fields, &positive, &negative);
        let json_text = serde_json::to_string_pretty(&object)
            .map_err(|e| JsonError::new(JsonErrorKind::Serialize(e.to_string())))?;

        debug!(latched = self.latches.len(), "Routed Anima fields");
        Ok(AnimaRoute {
            fields,
            positive,
            negative,
            vars,
            object,
            json_text,
        })
    }
}

fn source_value(data: &Map<String, Value>, field: AnimaField) -> String {
    field
        .source_keys()
        .iter()
        .filter_map(|key| data.get(*key))
        .map(|value| text_of(value).trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn build_vars(
    fields: &BTreeMap<AnimaField, String>,
    positive: &str,
    negative: &str,
    data: &Map<String, Value>,
) -> Vars {
    let mut named: Vec<(&str, &str)> = fields
        .iter()
        .map(|(field, value)| (field.key(), value.as_str()))
        .collect();
    if let Some(appearance) = fields.get(&AnimaField::Appearance) {
        named.push(("Appearance", appearance.as_str()));
    }
    named.push(("positive", positive));
    named.push(("negative", negative));

    let mut localized: Vec<(&str, &str)> = fields
        .iter()
        .filter(|(field, _)| **field != AnimaField::Neg)
        .map(|(field, value)| (field.localized(), value.as_str()))
        .collect();
    localized.push(("正面提示词", positive));
    localized.push(("负面提示词", negative));

    let mut vars = Vars::new();
    for (name, value) in named.into_iter().chain(localized) {
        vars.insert(name, value);
        vars.insert(format!("{}{}", VAR_PREFIX, name), value);
    }

    for (key, value) in data {
        if key.is_empty() || key.starts_with(VAR_PREFIX) || vars.contains(key) {
            continue;
        }
        let var = match value {
            Value::Null => VarValue::from(""),
            scalar @ (Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
                VarValue::from_json(scalar)
            }
            other => VarValue::from(text_of(other)),
        };
        let prefixed = format!("{}{}", VAR_PREFIX, key);
        if !vars.contains(&prefixed) {
            vars.insert(prefixed, var.clone());
        }
        vars.insert(key.as_str(), var);
    }
    vars
}

fn write_back(
    mut object: Map<String, Value>,
    fields: &BTreeMap<AnimaField, String>,
    positive: &str,
    negative: &str,
) -> Map<String, Value> {
    for (field, value) in fields {
        if *field == AnimaField::Appearance {
            continue;
        }
        object.insert(field.key().to_string(), Value::from(value.as_str()));
    }

    let appearance = fields
        .get(&AnimaField::Appearance)
        .cloned()
        .unwrap_or_default();
    let has_capitalized = object.contains_key("Appearance");
    if !appearance.trim().is_empty() || object.contains_key("appearance") || has_capitalized {
        object.insert("appearance".to_string(), Value::from(appearance.as_str()));
        if has_capitalized {
            object.insert("Appearance".to_string(), Value::from(appearance));
        }
    }

    object.insert("positive".to_string(), Value::from(positive));
    object.insert("negative".to_string(), Value::from(negative));
    object
}
