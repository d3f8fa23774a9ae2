//! Template variable nodes.

use serde_json::{Map, Value};
use simplechat_core::Vars;
use simplechat_error::TemplateError;
use simplechat_template::render;

/// Defines one template variable on top of incoming vars.
#[derive(Debug, Clone, Copy, Default)]
pub struct MustacheVarNode;

impl MustacheVarNode {
    /// Returns `vars_in` with `name` set to `value`.
    ///
    /// The name is trimmed; a blank name passes `vars_in` through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use simplechat_core::VarValue;
    /// use simplechat_nodes::MustacheVarNode;
    ///
    /// let vars = MustacheVarNode.run(" mood ", "calm", None);
    /// assert_eq!(vars.get("mood"), Some(&VarValue::from("calm")));
    /// assert!(MustacheVarNode.run("  ", "x", Some(&vars)).get("").is_none());
    /// ```
    pub fn run(&self, name: &str, value: &str, vars_in: Option<&Vars>) -> Vars {
        let mut merged = vars_in.cloned().unwrap_or_default();
        let key = name.trim();
        if !key.is_empty() {
            merged.insert(key, value);
        }
        merged
    }
}

/// Renders `{{name}}` placeholders in arbitrary text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MustacheRenderNode;

impl MustacheRenderNode {
    /// Renders `text` with `vars`; no vars renders against an empty map.
    pub fn run(
        &self,
        text: &str,
        vars: Option<&Vars>,
        keep_unmatched: bool,
    ) -> Result<String, TemplateError> {
        match vars {
            Some(vars) => render(text, vars, keep_unmatched),
            None => render(text, &Vars::new(), keep_unmatched),
        }
    }

    /// Renders `text` with the top-level keys of a parsed JSON object.
    pub fn run_with_object(
        &self,
        text: &str,
        object: &Map<String, Value>,
        keep_unmatched: bool,
    ) -> Result<String, TemplateError> {
        render(text, &Vars::from_json_object(object), keep_unmatched)
    }
}
