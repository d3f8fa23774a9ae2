//! JSON plumbing for LLM output.
//!
//! Models often wrap JSON in code fences or leave trailing commas. This
//! crate provides:
//!
//! - [`strip_code_fence`] and a chain of fallback parsers ([`parse_lenient`],
//!   [`parse_object`]) tried in a fixed order
//! - dot/bracket path lookup ([`extract_path`]) that reports a missing value
//!   instead of failing
//! - projections of a parsed object into template variables
//!   ([`JsonToVars`], [`PromptParams`])

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lenient;
mod path;
mod patterns;
mod unpack;
mod vars;

pub use lenient::{
    first_balanced_object, parse_annotated, parse_input, parse_lenient, parse_object,
    parse_outermost_object, parse_strict, repair_trailing_commas, strip_code_fence, type_name,
};
pub use path::{PathToken, extract, extract_path, stringify, tokenize};
pub use unpack::{PromptParams, normalize_sampler};
pub use vars::{JsonToVars, JsonToVarsBuilder, MergeOrder, flatten, parse_overrides, scalar_var};
