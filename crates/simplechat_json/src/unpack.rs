//! Fixed-schema image prompt unpacking.

use crate::lenient::{parse_object, strip_code_fence};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use simplechat_core::{VarValue, Vars};
use simplechat_error::JsonError;

const DEFAULT_SIZE: i64 = 1024;
const DEFAULT_STEPS: i64 = 40;
const DEFAULT_CFG: f64 = 4.5;
const DEFAULT_SAMPLER: &str = "er_sde";
const DEFAULT_SEED: i64 = -1;

/// Alternate variable names published next to the schema names.
const LOCALIZED_ALIASES: &[(&str, &str)] = &[
    ("positive", "正面提示词"),
    ("negative", "负面提示词"),
    ("width", "宽"),
    ("height", "高"),
    ("steps", "步数"),
    ("sampler", "采样器"),
    ("seed", "种子"),
    ("notes", "备注"),
];

/// Image generation parameters read from one JSON object:
///
/// ```json
/// {"positive": "...", "negative": "...", "width": 1024, "height": 1024,
///  "steps": 40, "cfg": 4.5, "sampler": "er_sde", "seed": -1, "notes": "..."}
/// ```
///
/// Numbers are coerced leniently; anything unusable falls back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct PromptParams {
    /// Positive prompt
    positive: String,
    /// Negative prompt
    negative: String,
    /// Image width
    width: i64,
    /// Image height
    height: i64,
    /// Sampling steps
    steps: i64,
    /// Classifier-free guidance scale
    cfg: f64,
    /// Normalized sampler name
    sampler: String,
    /// Seed, -1 for random
    seed: i64,
    /// Free-form notes
    notes: String,
}

impl Default for PromptParams {
    fn default() -> Self {
        Self {
            positive: String::new(),
            negative: String::new(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            steps: DEFAULT_STEPS,
            cfg: DEFAULT_CFG,
            sampler: DEFAULT_SAMPLER.to_string(),
            seed: DEFAULT_SEED,
            notes: String::new(),
        }
    }
}

fn as_int(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Bool(b)) => i64::from(*b),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round_ties_even() as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(default)
        }
        _ => default,
    }
}

fn as_float(value: Option<&Value>, default: f64) -> f64 {
    match value {
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(default),
        _ => default,
    }
}

fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Maps community shorthand to canonical sampler names, lower-cased.
///
/// # Examples
///
/// ```
/// use simplechat_json::normalize_sampler;
///
/// assert_eq!(normalize_sampler("Euler A"), "euler a");
/// assert_eq!(normalize_sampler("euler-ancestral"), "euler_ancestral");
/// assert_eq!(normalize_sampler("  "), "er_sde");
/// ```
pub fn normalize_sampler(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_SAMPLER.to_string();
    }
    let lower = name.to_lowercase();
    match lower.as_str() {
        "euler_a" | "euler-ancestral" | "euler ancestral" => "euler_ancestral".to_string(),
        _ => lower,
    }
}

impl PromptParams {
    /// Reads parameters from a JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            positive: as_text(object.get("positive")),
            negative: as_text(object.get("negative")),
            width: as_int(object.get("width"), DEFAULT_SIZE),
            height: as_int(object.get("height"), DEFAULT_SIZE),
            steps: as_int(object.get("steps"), DEFAULT_STEPS),
            cfg: as_float(object.get("cfg"), DEFAULT_CFG),
            sampler: normalize_sampler(&as_text(object.get("sampler"))),
            seed: as_int(object.get("seed"), DEFAULT_SEED),
            notes: as_text(object.get("notes")),
        }
    }

    /// Parses model output (optionally fenced) into parameters plus the object.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] when the text is not a JSON object.
    pub fn unpack(
        text: &str,
        strip_fence: bool,
    ) -> Result<(Self, Map<String, Value>), JsonError> {
        let raw = if strip_fence {
            strip_code_fence(text)?
        } else {
            text
        };
        let object = parse_object(raw)?;
        Ok((Self::from_object(&object), object))
    }

    /// Template variables under plain, `anima.`-prefixed and localized names.
    pub fn vars(&self) -> Vars {
        let plain: Vec<(&str, VarValue)> = vec![
            ("positive", VarValue::from(self.positive.as_str())),
            ("negative", VarValue::from(self.negative.as_str())),
            ("width", VarValue::Int(self.width)),
            ("height", VarValue::Int(self.height)),
            ("steps", VarValue::Int(self.steps)),
            ("cfg", VarValue::Float(self.cfg)),
            ("sampler", VarValue::from(self.sampler.as_str())),
            ("sampler_name", VarValue::from(self.sampler.as_str())),
            ("seed", VarValue::Int(self.seed)),
            ("notes", VarValue::from(self.notes.as_str())),
        ];

        let mut vars = Vars::new();
        for (name, value) in &plain {
            vars.insert(*name, value.clone());
            vars.insert(format!("anima.{}", name), value.clone());
        }
        for (name, alias) in LOCALIZED_ALIASES {
            if let Some(value) = plain.iter().find(|(n, _)| n == name).map(|(_, v)| v.clone()) {
                vars.insert(*alias, value.clone());
                vars.insert(format!("anima.{}", alias), value);
            }
        }
        vars
    }
}
