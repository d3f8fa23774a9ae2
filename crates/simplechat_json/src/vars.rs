//! Projection of a JSON object into template variables.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use simplechat_core::{VarValue, Vars};

/// Which side wins when JSON keys collide with incoming vars.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MergeOrder {
    /// Incoming vars replace JSON-derived values
    #[default]
    VarsInOverridesJson,
    /// JSON-derived values replace incoming vars
    JsonOverridesVarsIn,
}

/// Scalar JSON values stay typed; containers become compact JSON text.
pub fn scalar_var(value: &Value) -> VarValue {
    VarValue::from_json(value)
}

/// Flattens nested objects to `a.b.c` keys and arrays to `arr[0]` keys.
///
/// Empty object keys are skipped.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use simplechat_core::VarValue;
/// use simplechat_json::flatten;
///
/// let vars = flatten(&json!({"a": {"b": 1}, "tags": ["x", "y"]}));
/// assert_eq!(vars.get("a.b"), Some(&VarValue::Int(1)));
/// assert_eq!(vars.get("tags[1]"), Some(&VarValue::from("y")));
/// ```
pub fn flatten(value: &Value) -> Vars {
    let mut out = Vars::new();
    flatten_into("", value, &mut out);
    out
}

fn flatten_into(prefix: &str, value: &Value, out: &mut Vars) {
    match value {
        Value::Object(object) => {
            for (key, child) in object.iter().filter(|(k, _)| !k.is_empty()) {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(&path, child, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(&format!("{}[{}]", prefix, i), child, out);
            }
        }
        scalar => out.insert(prefix, scalar_var(scalar)),
    }
}

/// Parses manual override lines.
///
/// Accepts `key=value`, `key: value` and a bare `key` (empty value). Blank
/// lines and lines starting with `#` or `//` are skipped. The first `=` wins
/// over `:` so values may contain colons.
pub fn parse_overrides(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("//"))
        .filter_map(|line| {
            let (key, value) = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .unwrap_or((line, ""));
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Converts a JSON object into template variables.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use simplechat_core::VarValue;
/// use simplechat_json::JsonToVars;
///
/// let converter = JsonToVars::builder()
///     .prefix("anima.")
///     .overrides("style=noir")
///     .build()
///     .unwrap();
///
/// let object = json!({"style": "pastel", "seed": 7});
/// let vars = converter.apply(object.as_object().unwrap(), None);
///
/// assert_eq!(vars.get("anima.seed"), Some(&VarValue::Int(7)));
/// assert_eq!(vars.get("style"), Some(&VarValue::from("noir")));
/// assert_eq!(vars.get("anima.style"), Some(&VarValue::from("noir")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct JsonToVars {
    /// Flatten nested values into path keys; otherwise only top-level keys
    #[builder(default = "true")]
    flatten_keys: bool,
    /// Optional key prefix; a trailing `.` is ignored
    #[builder(default)]
    prefix: String,
    /// Collision order between JSON values and incoming vars
    #[builder(default)]
    merge: MergeOrder,
    /// Manual `key=value` lines, applied last
    #[builder(default)]
    overrides: String,
}

impl Default for JsonToVars {
    fn default() -> Self {
        Self {
            flatten_keys: true,
            prefix: String::new(),
            merge: MergeOrder::default(),
            overrides: String::new(),
        }
    }
}

impl JsonToVars {
    /// Creates a new builder for `JsonToVars`.
    pub fn builder() -> JsonToVarsBuilder {
        JsonToVarsBuilder::default()
    }

    fn normalized_prefix(&self) -> &str {
        let prefix = self.prefix.trim();
        prefix.strip_suffix('.').unwrap_or(prefix)
    }

    /// Projects `object` into vars and merges `vars_in`.
    ///
    /// With a prefix every JSON key is present both plain and prefixed.
    /// Manual overrides always win; undotted override keys also set their
    /// prefixed twin.
    pub fn apply(&self, object: &Map<String, Value>, vars_in: Option<&Vars>) -> Vars {
        let mut base = if self.flatten_keys {
            let mut out = Vars::new();
            for (key, value) in object.iter().filter(|(k, _)| !k.is_empty()) {
                flatten_into(key, value, &mut out);
            }
            out
        } else {
            object
                .iter()
                .filter(|(k, _)| !k.is_empty())
                .map(|(k, v)| (k.clone(), scalar_var(v)))
                .collect()
        };

        let prefix = self.normalized_prefix();
        if !prefix.is_empty() {
            let prefixed: Vars = base
                .iter()
                .map(|(k, v)| (format!("{}.{}", prefix, k), v.clone()))
                .collect();
            base.merge(prefixed);
        }

        let mut manual = Vars::new();
        for (key, value) in parse_overrides(&self.overrides) {
            if !prefix.is_empty() && !key.contains('.') {
                manual.insert(format!("{}.{}", prefix, key), value.clone());
            }
            manual.insert(key, value);
        }

        let mut merged = Vars::new();
        match self.merge {
            MergeOrder::JsonOverridesVarsIn => {
                if let Some(vars_in) = vars_in {
                    merged.merge(vars_in.clone());
                }
                merged.merge(base);
            }
            MergeOrder::VarsInOverridesJson => {
                merged.merge(base);
                if let Some(vars_in) = vars_in {
                    merged.merge(vars_in.clone());
                }
            }
        }
        merged.merge(manual);
        merged
    }
}
