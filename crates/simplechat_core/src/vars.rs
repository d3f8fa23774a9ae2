//! Mustache variable maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scalar value bound to a template variable.
///
/// Non-scalar JSON values are carried as their compact JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(untagged)]
pub enum VarValue {
    /// Renders as the empty string
    #[from(ignore)]
    Null,
    /// Renders as `True` / `False`
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
}

impl VarValue {
    /// Converts a JSON value into a variable value.
    ///
    /// Objects and arrays become their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => VarValue::Null,
            serde_json::Value::Bool(b) => VarValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => VarValue::Int(i),
                None => VarValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => VarValue::Text(s.clone()),
            other => VarValue::Text(other.to_string()),
        }
    }

    /// Whether the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, VarValue::Null)
    }
}

impl std::fmt::Display for VarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarValue::Null => Ok(()),
            VarValue::Bool(true) => write!(f, "True"),
            VarValue::Bool(false) => write!(f, "False"),
            VarValue::Int(i) => write!(f, "{}", i),
            VarValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            VarValue::Float(x) => write!(f, "{}", x),
            VarValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        VarValue::Text(value.to_string())
    }
}

/// Mapping from variable name to value, consumed by the template renderer.
///
/// # Examples
///
/// ```
/// use simplechat_core::{Vars, VarValue};
///
/// let mut base = Vars::new();
/// base.insert("name", "Alice");
/// base.insert("age", 30);
///
/// let mut extra = Vars::new();
/// extra.insert("name", "Bob");
///
/// base.merge(extra);
/// assert_eq!(base.get("name"), Some(&VarValue::from("Bob")));
/// assert_eq!(base.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vars(BTreeMap<String, VarValue>);

impl Vars {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<VarValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Looks up a variable.
    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.0.get(name)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Copies every binding of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: Vars) {
        self.0.extend(other.0);
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &VarValue)> {
        self.0.iter()
    }

    /// Builds a map from the top-level entries of a JSON object.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        object
            .iter()
            .map(|(k, v)| (k.clone(), VarValue::from_json(v)))
            .collect()
    }
}

impl FromIterator<(String, VarValue)> for Vars {
    fn from_iter<I: IntoIterator<Item = (String, VarValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Vars {
    type Item = (String, VarValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, VarValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<i32> for VarValue {
    fn from(value: i32) -> Self {
        VarValue::Int(i64::from(value))
    }
}

impl From<u32> for VarValue {
    fn from(value: u32) -> Self {
        VarValue::Int(i64::from(value))
    }
}
