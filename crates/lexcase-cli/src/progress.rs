//! # Progress Subcommand
//!
//! Renders the step-indexed progress view of one snapshot.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lexcase_lifecycle::{lifecycle_progress, resolve_lifecycle_status, ProgressMetrics};

use crate::input::read_snapshot;
use crate::output::{emit, render, OutputFormat};

#[derive(Args, Debug)]
pub struct ProgressArgs {
    /// Snapshot JSON file, or `-` for stdin.
    pub snapshot: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn render_text(progress: &ProgressMetrics) -> String {
    let mut out = String::new();
    for (i, step) in progress.steps.iter().enumerate() {
        let mark = if step.is_current {
            ">"
        } else if step.is_complete {
            "x"
        } else {
            " "
        };
        let _ = write!(out, "[{mark}] {} {}", i + 1, step.label);
        if step.needs_attention {
            out.push_str("  (needs attention)");
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{} ({}/{}, {}%)",
        progress.label, progress.current_step, progress.total_steps, progress.progress_percent
    );
    out
}

/// Execute the progress subcommand.
pub fn run_progress(args: &ProgressArgs) -> Result<u8> {
    let snapshot = read_snapshot(&args.snapshot)?;
    let status = resolve_lifecycle_status(&snapshot);
    let progress = lifecycle_progress(&snapshot, status);
    emit(&render(&progress, args.format, render_text)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexcase_lifecycle::CaseSnapshot;

    #[test]
    fn test_clarification_rendering() {
        let snap = CaseSnapshot {
            is_assigned: true,
            is_marketplace_posted: true,
            open_clarification_count: 1,
            ..Default::default()
        };
        let progress = lifecycle_progress(&snap, resolve_lifecycle_status(&snap));
        let text = render_text(&progress);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "[x] 1 Draft");
        assert_eq!(lines[1], "[x] 2 Posted");
        assert_eq!(lines[2], "[>] 3 Assigned  (needs attention)");
        assert_eq!(lines[3], "[ ] 4 In Review");
        assert_eq!(lines[7], "Awaiting your response (3/7, 43%)");
    }
}
