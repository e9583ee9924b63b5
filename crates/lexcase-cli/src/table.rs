//! # Table Subcommand
//!
//! Prints the active status presentation table. YAML output is a valid
//! `presentation:` section for an engine config file.

use std::fmt::Write as _;

use anyhow::Result;
use clap::Args;

use lexcase_lifecycle::{EngineConfig, PresentationTable};

use crate::output::{emit, render, OutputFormat};

#[derive(Args, Debug)]
pub struct TableArgs {
    /// Render a raw status value through the table, including the fallback
    /// for values this build does not know.
    #[arg(long)]
    pub label: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn render_text(table: &PresentationTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "presentation table v{}", table.version());
    for (status, entry) in table.iter() {
        let terminal = if entry.is_terminal { "terminal" } else { "" };
        let _ = writeln!(
            out,
            "{:<22} {:<22} {:<9} {}",
            status.as_str(),
            entry.label,
            terminal,
            entry.description
        );
    }
    out
}

/// Execute the table subcommand.
pub fn run_table(args: &TableArgs, config: &EngineConfig) -> Result<u8> {
    if let Some(raw) = &args.label {
        emit(&config.presentation.label_for_raw(raw));
        return Ok(0);
    }
    emit(&render(&config.presentation, args.format, render_text)?);
    Ok(0)
}
