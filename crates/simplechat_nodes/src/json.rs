//! JSON extraction and projection nodes.

use derive_getters::Getters;
use serde_json::{Map, Value};
use simplechat_core::Vars;
use simplechat_error::{JsonError, JsonErrorKind};
use simplechat_json::{
    JsonToVars, PromptParams, extract_path, parse_input, stringify, type_name,
};
use tracing::{debug, instrument};

fn parse_object_input(json_text: &str, strip_fence: bool) -> Result<Map<String, Value>, JsonError> {
    match parse_input(json_text, strip_fence)? {
        Value::Object(object) => Ok(object),
        other => Err(JsonError::new(JsonErrorKind::NotAnObject(
            type_name(&other).to_string(),
        ))),
    }
}

/// Extracted values plus the parsed document.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct JsonParseOutput {
    /// One value per requested path
    values: Vec<String>,
    /// Parsed document
    object: Value,
}

/// Parses JSON and extracts values by dot/bracket path.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParseNode;

impl JsonParseNode {
    /// Extracts each of `paths` from `json_text`.
    ///
    /// Blank paths and missing values yield `default`.
    ///
    /// # Errors
    ///
    /// A [`JsonError`] when the text does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use simplechat_nodes::JsonParseNode;
    ///
    /// let out = JsonParseNode
    ///     .run(r#"{"a": {"b": [{}, {"c": "x"}]}}"#, true, "-", &["a.b[1].c", "a.b[2].c", ""])
    ///     .unwrap();
    /// assert_eq!(out.values(), &["x", "-", "-"]);
    /// ```
    #[instrument(skip_all, fields(paths = paths.len()))]
    pub fn run<S: AsRef<str>>(
        &self,
        json_text: &str,
        strip_fence: bool,
        default: &str,
        paths: &[S],
    ) -> Result<JsonParseOutput, JsonError> {
        let object = parse_input(json_text, strip_fence)?;
        let values = paths
            .iter()
            .map(|path| {
                let path = path.as_ref().trim();
                if path.is_empty() {
                    return default.to_string();
                }
                match extract_path(&object, path) {
                    Some(value) => stringify(value),
                    None => {
                        debug!(path, "Path missing, using default");
                        default.to_string()
                    }
                }
            })
            .collect();
        Ok(JsonParseOutput { values, object })
    }
}

/// Converts a JSON object into template variables.
#[derive(Debug, Clone, Default)]
pub struct JsonToVarsNode {
    converter: JsonToVars,
}

impl JsonToVarsNode {
    /// Node applying `converter`.
    pub fn new(converter: JsonToVars) -> Self {
        Self { converter }
    }

    /// Parses `json_text` and projects it, merging `vars_in`.
    ///
    /// # Errors
    ///
    /// A [`JsonError`] when the text is not a JSON object.
    pub fn run(
        &self,
        json_text: &str,
        strip_fence: bool,
        vars_in: Option<&Vars>,
    ) -> Result<Vars, JsonError> {
        let object = parse_object_input(json_text, strip_fence)?;
        Ok(self.converter.apply(&object, vars_in))
    }
}

/// Typed image parameters, their vars and the parsed object.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct PromptUnpackOutput {
    /// Coerced parameters
    params: PromptParams,
    /// Parameters as template variables
    vars: Vars,
    /// Parsed object
    object: Map<String, Value>,
}

/// Unpacks an image prompt JSON into typed parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptUnpackNode;

impl PromptUnpackNode {
    /// Parses and coerces `json_text`.
    ///
    /// # Errors
    ///
    /// A [`JsonError`] when the text is not a JSON object.
    pub fn run(&self, json_text: &str, strip_fence: bool) -> Result<PromptUnpackOutput, JsonError> {
        let (params, object) = PromptParams::unpack(json_text, strip_fence)?;
        let vars = params.vars();
        Ok(PromptUnpackOutput {
            params,
            vars,
            object,
        })
    }
}
