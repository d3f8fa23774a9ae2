//! Cross-product prompt generation for XY comparisons.

use crate::{AnimaField, join_pieces, split_list, text_of};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use simplechat_error::{JsonError, JsonErrorKind};
use simplechat_json::{parse_annotated, strip_code_fence, type_name};
use tracing::{debug, instrument};

/// What happens when X and Y target the same field.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SameFieldBehavior {
    /// Y replaces X unless Y is blank
    Override,
    /// X and Y are joined
    #[default]
    Combine,
}

/// Separator used when combining X and Y values.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PairJoin {
    /// `\n`
    #[default]
    Newline,
    /// `, `
    Comma,
    /// ` `
    Space,
    /// The configured custom joiner
    Custom,
}

/// Generated cells, row-major by Y.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct XyGrid {
    /// One pretty-printed JSON prompt per cell
    cells: Vec<String>,
    /// Number of X values
    columns: usize,
    /// X values, one per line
    x_labels: String,
    /// Y values, one per line
    y_labels: String,
}

/// Builds one prompt per (X, Y) pair from a base prompt JSON.
///
/// # Examples
///
/// ```
/// use simplechat_anima::{AnimaField, XyMatrix};
///
/// let matrix = XyMatrix::builder()
///     .x_list("@a\n@b")
///     .y_list("street")
///     .build()
///     .unwrap();
/// let grid = matrix.build(r#"{"tags": "solo"}"#).unwrap();
///
/// assert_eq!(*grid.columns(), 2);
/// assert_eq!(grid.cells().len(), 2);
/// assert!(grid.cells()[1].contains("\"positive\": \"@b, street, solo\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct XyMatrix {
    /// Field varied along X
    #[builder(default = "AnimaField::Artist")]
    x_field: AnimaField,
    /// X values, one per line
    #[builder(default)]
    x_list: String,
    /// Field varied along Y
    #[builder(default = "AnimaField::Environment")]
    y_field: AnimaField,
    /// Y values, one per line
    #[builder(default)]
    y_list: String,
    /// Include the environment in the rebuilt positive prompt
    #[builder(default = "true")]
    include_environment: bool,
    /// Reuse the X values when no Y values are given
    #[builder(default = "true")]
    auto_y_from_x: bool,
    /// Handling when both axes target one field
    #[builder(default)]
    same_field: SameFieldBehavior,
    /// Separator for combined values
    #[builder(default)]
    pair_join: PairJoin,
    /// Separator for [`PairJoin::Custom`]; a literal `\n` means newline
    #[builder(default = r#""\\n".to_string()"#)]
    custom_join: String,
    /// Collapse a combined pair with equal values to one value
    #[builder(default = "true")]
    diagonal_single: bool,
    /// Strip a code fence before parsing
    #[builder(default = "true")]
    strip_fence: bool,
}

impl XyMatrix {
    /// Creates a new builder for `XyMatrix`.
    pub fn builder() -> XyMatrixBuilder {
        XyMatrixBuilder::default()
    }

    fn joiner(&self) -> String {
        match self.pair_join {
            PairJoin::Newline => "\n".to_string(),
            PairJoin::Comma => ", ".to_string(),
            PairJoin::Space => " ".to_string(),
            PairJoin::Custom => self.custom_join.replace("\\n", "\n"),
        }
    }

    fn combine(&self, x: &str, y: &str) -> String {
        let (x, y) = (x.trim(), y.trim());
        if x.is_empty() {
            return y.to_string();
        }
        if y.is_empty() || (self.diagonal_single && x == y) {
            return x.to_string();
        }
        format!("{}{}{}", x, self.joiner(), y)
    }

    /// Generates every cell for `json_text`.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] when the base text is not a JSON object.
    #[instrument(skip(self, json_text), fields(x = %self.x_field, y = %self.y_field))]
    pub fn build(&self, json_text: &str) -> Result<XyGrid, JsonError> {
        let raw = if self.strip_fence {
            strip_code_fence(json_text)?
        } else {
            json_text
        };
        let base = match parse_annotated(raw)? {
            Value::Object(object) => object,
            other => {
                return Err(JsonError::new(JsonErrorKind::NotAnObject(
                    type_name(&other).to_string(),
                )));
            }
        };

        let mut xs = split_list(&self.x_list);
        if xs.is_empty() {
            xs.push(String::new());
        }
        let mut ys = split_list(&self.y_list);
        if ys.is_empty() {
            ys = if self.auto_y_from_x {
                xs.clone()
            } else {
                vec![String::new()]
            };
        }

        let cells = ys
            .iter()
            .flat_map(|y| xs.iter().map(move |x| (x, y)))
            .map(|(x, y)| {
                serde_json::to_string_pretty(&self.cell(&base, x, y))
                    .map_err(|e| JsonError::new(JsonErrorKind::Serialize(e.to_string())))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(cells = cells.len(), columns = xs.len(), "Built XY matrix");
        Ok(XyGrid {
            cells,
            columns: xs.len(),
            x_labels: xs.join("\n"),
            y_labels: ys.join("\n"),
        })
    }

    fn cell(&self, base: &Map<String, Value>, x: &str, y: &str) -> Map<String, Value> {
        let mut object = base.clone();
        let (x_key, y_key) = (self.x_field.key(), self.y_field.key());

        if self.x_field == self.y_field {
            let value = match self.same_field {
                SameFieldBehavior::Combine => self.combine(x, y),
                SameFieldBehavior::Override if !y.trim().is_empty() => y.to_string(),
                SameFieldBehavior::Override => x.to_string(),
            };
            object.insert(x_key.to_string(), Value::from(value));
        } else {
            object.insert(x_key.to_string(), Value::from(x));
            object.insert(y_key.to_string(), Value::from(y));
        }
        if self.x_field == AnimaField::Neg {
            object.insert("negative".to_string(), Value::from(x));
        }
        if self.y_field == AnimaField::Neg {
            object.insert("negative".to_string(), Value::from(y));
        }

        let part = |keys: &[&str]| -> String {
            keys.iter()
                .find_map(|key| object.get(*key))
                .map(text_of)
                .unwrap_or_default()
        };
        let quality = part(&["quality_meta_year_safe", "quality"]);
        let count = part(&["count"]);
        let character = part(&["character"]);
        let appearance = part(&["appearance", "Appearance"]);
        let series = part(&["series"]);
        let artist = part(&["artist"]);
        let style = part(&["style"]);
        let environment = if self.include_environment {
            part(&["environment", "background", "scene"])
        } else {
            String::new()
        };
        let tags = part(&["tags"]);
        let neg = part(&["neg", "negative"]);

        let positive = join_pieces([
            quality.as_str(),
            count.as_str(),
            character.as_str(),
            appearance.as_str(),
            series.as_str(),
            artist.as_str(),
            style.as_str(),
            environment.as_str(),
            tags.as_str(),
        ]);

        object.insert("positive".to_string(), Value::from(positive));
        object.insert("neg".to_string(), Value::from(neg.as_str()));
        object.insert("negative".to_string(), Value::from(neg));
        object
    }
}
