//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the simplechat binary.

mod commands;
mod input;
mod llm;
mod tools;

pub use commands::{Cli, Commands};
pub use input::CliResult;
pub use llm::{
    ChatOptions, ImageOptions, NoassOptions, list_models, run_chat, run_image, run_noass,
};
pub use tools::{extract_json, render_template, route_anima};
