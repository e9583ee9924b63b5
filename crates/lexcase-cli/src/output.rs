//! Output formats shared by every subcommand.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Render `value` in a structured format, or with `text` for
/// [`OutputFormat::Text`].
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("failed to serialize output as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).context("failed to serialize output as YAML")
        }
    }
}

/// Print rendered output to stdout with exactly one trailing newline.
pub fn emit(rendered: &str) {
    println!("{}", rendered.trim_end_matches('\n'));
}
