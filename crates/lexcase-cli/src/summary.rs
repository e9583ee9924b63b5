//! # Summary Subcommand
//!
//! Dashboard view of one snapshot or a JSON array of snapshots, most urgent
//! first.
//!
//! ```bash
//! lexcase summary cases.json --now 2026-03-10T12:00:00Z
//! lexcase summary cases.json --role lawyer
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use lexcase_lifecycle::{summarize_all, ActionAdvice, EngineConfig, LifecycleSummary, ViewerRole};

use crate::input::{read_snapshots, resolve_now};
use crate::output::{emit, render, OutputFormat};
use crate::resolve::EXIT_MALFORMED;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Snapshot JSON file (object or array), or `-` for stdin.
    pub snapshots: PathBuf,

    /// Evaluation instant for SLA projection (RFC 3339). Defaults to now.
    #[arg(long)]
    pub now: Option<String>,

    /// Whose next action the text table shows.
    #[arg(long, value_enum, default_value_t = RoleArg::Client)]
    pub role: RoleArg,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Viewer role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    #[default]
    Client,
    Lawyer,
}

impl From<RoleArg> for ViewerRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Client => ViewerRole::Client,
            RoleArg::Lawyer => ViewerRole::Lawyer,
        }
    }
}

fn advice_for(summary: &LifecycleSummary, role: ViewerRole) -> &ActionAdvice {
    match role {
        ViewerRole::Client => &summary.next_action,
        ViewerRole::Lawyer => &summary.lawyer_action,
    }
}

pub fn render_text(summaries: &[LifecycleSummary], role: ViewerRole) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>7}  {:<13}  {:<20}  {:<16}  {:<22}  CASE",
        "URGENCY", "BUCKET", "STATUS", "SLA", "NEXT"
    );
    for s in summaries {
        let case = s
            .case_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let drift = if s.drift.is_some() { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:>7}  {:<13}  {:<20}  {:<16}  {:<22}  {case}{drift}",
            s.urgency_score,
            s.bucket.as_str(),
            s.presentation.label,
            s.sla.text,
            advice_for(s, role).title,
        );
    }
    let drifted = summaries.iter().filter(|s| s.drift.is_some()).count();
    let _ = write!(out, "{} case(s)", summaries.len());
    if drifted > 0 {
        let _ = write!(out, ", {drifted} with stored status drift (*)");
    }
    out.push('\n');
    out
}

/// Execute the summary subcommand.
pub fn run_summary(args: &SummaryArgs, config: &EngineConfig) -> Result<u8> {
    let snapshots = read_snapshots(&args.snapshots)?;
    let now = resolve_now(args.now.as_deref())?;
    let summaries = match summarize_all(&snapshots, now, config) {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::error!(path = %args.snapshots.display(), "malformed snapshot: {e}");
            return Ok(EXIT_MALFORMED);
        }
    };
    tracing::info!(cases = summaries.len(), now = %now, "summaries computed");
    let role = ViewerRole::from(args.role);
    emit(&render(&summaries, args.format, |s| render_text(s, role))?);
    Ok(0)
}
