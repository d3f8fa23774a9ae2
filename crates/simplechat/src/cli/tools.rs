//! Handlers for the offline text and JSON commands.

use serde_json::{Map, Value, json};
use simplechat_anima::{AnimaField, AnimaRouter, RouteOptions};
use simplechat_core::Vars;
use simplechat_error::ConfigError;
use simplechat_nodes::{JsonParseNode, JsonToVarsNode, MustacheRenderNode, PromptUnpackNode};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

use super::commands::{AnimaOutput, JsonOutput};
use super::input::{CliResult, read_text, var_args};

/// Renders a template file with `--var` and `--vars-json` values.
///
/// `--var` values win over the JSON file.
#[instrument(skip(vars))]
pub fn render_template(
    template: &Path,
    vars: &[String],
    vars_json: Option<&Path>,
    drop_unmatched: bool,
) -> CliResult<()> {
    let text = read_text(template)?;

    let mut merged = match vars_json {
        Some(path) => JsonToVarsNode::default().run(&read_text(path)?, true, None)?,
        None => Vars::new(),
    };
    merged.merge(var_args(vars));

    let rendered = MustacheRenderNode.run(&text, Some(&merged), !drop_unmatched)?;
    print!("{}", rendered);
    Ok(())
}

/// Extracts values, vars or prompt parameters from a JSON document.
#[instrument(skip(paths))]
pub fn extract_json(
    input: &Path,
    paths: &[String],
    default: &str,
    output: JsonOutput,
    strip_fence: bool,
) -> CliResult<()> {
    let text = read_text(input)?;

    match output {
        JsonOutput::Values => {
            let parsed = JsonParseNode.run(&text, strip_fence, default, paths)?;
            for value in parsed.values() {
                println!("{}", value);
            }
        }
        JsonOutput::Vars => {
            let vars = JsonToVarsNode::default().run(&text, strip_fence, None)?;
            println!("{}", serde_json::to_string_pretty(&vars)?);
        }
        JsonOutput::Unpack => {
            let unpacked = PromptUnpackNode.run(&text, strip_fence)?;
            println!("{}", serde_json::to_string_pretty(unpacked.params())?);
        }
    }
    Ok(())
}

fn anima_field(name: &str) -> Result<AnimaField, ConfigError> {
    AnimaField::from_str(name.trim())
        .map_err(|_| ConfigError::new(format!("Unknown Anima field: {}", name)))
}

/// Builds route options from `--lock` and `--set` flags.
pub fn route_options(
    locks: &[String],
    overrides: &[String],
    strip_fence: bool,
) -> Result<RouteOptions, ConfigError> {
    let mut options = RouteOptions::new().with_strip_fence(strip_fence);
    for name in locks {
        options = options.lock(anima_field(name)?, true);
    }
    for entry in overrides {
        let (name, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
        options = options.override_field(anima_field(name)?, value.trim());
    }
    Ok(options)
}

/// Routes an Anima prompt JSON and prints the requested view.
#[instrument(skip(locks, overrides))]
pub fn route_anima(
    input: &Path,
    locks: &[String],
    overrides: &[String],
    output: AnimaOutput,
    strip_fence: bool,
) -> CliResult<()> {
    let text = read_text(input)?;
    let options = route_options(locks, overrides, strip_fence)?;

    let mut router = AnimaRouter::new();
    let route = router.route(&text, &options)?;

    match output {
        AnimaOutput::Prompts => {
            let prompts = json!({
                "positive": route.positive(),
                "negative": route.negative(),
            });
            println!("{}", serde_json::to_string_pretty(&prompts)?);
        }
        AnimaOutput::Fields => {
            let fields: Map<String, Value> = route
                .fields()
                .iter()
                .map(|(field, value)| (field.to_string(), Value::String(value.clone())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        AnimaOutput::Json => println!("{}", route.json_text()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_options_parse_locks_and_overrides() -> anyhow::Result<()> {
        let options = route_options(
            &["Artist".to_string()],
            &["environment=rainy street".to_string()],
            false,
        )?;
        assert!(!options.strip_fence());
        assert!(options.control(AnimaField::Artist).lock);
        assert_eq!(
            options.control(AnimaField::Environment).override_value,
            "rainy street"
        );
        Ok(())
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = route_options(&["palette".to_string()], &[], true).expect_err("unknown field");
        assert!(err.message.contains("palette"));
    }
}
