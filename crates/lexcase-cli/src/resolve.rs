//! # Resolve Subcommand
//!
//! Resolves one snapshot and reports the status, the rule that decided it,
//! and whether the stored status column has drifted.
//!
//! ```bash
//! lexcase resolve case.json
//! lexcase resolve case.json --now 2026-03-10T12:00:00Z --format json
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use lexcase_core::CaseId;
use lexcase_lifecycle::{
    calculate_sla, detect_drift, explain_resolution, CaseSnapshot, EngineConfig, LifecycleStatus,
    ResolutionRule, SlaMetrics, StatusDrift,
};

use crate::input::{read_snapshot, resolve_now};
use crate::output::{emit, render, OutputFormat};

/// Exit code for a snapshot whose fields contradict each other.
pub const EXIT_MALFORMED: u8 = 2;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Snapshot JSON file, or `-` for stdin.
    pub snapshot: PathBuf,

    /// Also project the SLA at this RFC 3339 instant.
    #[arg(long)]
    pub now: Option<String>,

    /// Resolve contradictory snapshots instead of rejecting them.
    #[arg(long)]
    pub lenient: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
    pub status: LifecycleStatus,
    pub label: String,
    pub rule: ResolutionRule,
    pub rule_priority: u8,
    pub rule_description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift: Option<StatusDrift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla: Option<SlaMetrics>,
}

impl ResolveReport {
    pub fn build(
        snapshot: &CaseSnapshot,
        config: &EngineConfig,
        now: Option<lexcase_core::Timestamp>,
    ) -> Self {
        let resolution = explain_resolution(snapshot);
        let status = resolution.status;
        Self {
            case_id: snapshot.case_id,
            status,
            label: config.presentation.label(status).to_string(),
            rule: resolution.rule,
            rule_priority: resolution.rule.priority(),
            rule_description: resolution.rule.description(),
            drift: detect_drift(snapshot, status),
            sla: now.map(|now| calculate_sla(snapshot, status, now, &config.sla)),
        }
    }
}

pub fn render_text(report: &ResolveReport) -> String {
    let mut out = String::new();
    if let Some(id) = &report.case_id {
        let _ = writeln!(out, "case:   {id}");
    }
    let _ = writeln!(out, "status: {} ({})", report.status, report.label);
    let _ = writeln!(
        out,
        "rule:   {} {}",
        report.rule_priority, report.rule_description
    );
    if let Some(drift) = &report.drift {
        let reading = drift
            .stored_reading
            .map_or_else(|| "unrecognized".to_string(), |s| s.to_string());
        let _ = writeln!(out, "drift:  stored {:?} reads as {reading}", drift.stored.as_str());
    }
    if let Some(sla) = &report.sla {
        let _ = writeln!(out, "sla:    {} ({})", sla.status, sla.text);
    }
    out
}

/// Execute the resolve subcommand.
pub fn run_resolve(args: &ResolveArgs, config: &EngineConfig) -> Result<u8> {
    let snapshot = read_snapshot(&args.snapshot)?;
    if !args.lenient {
        if let Err(e) = snapshot.validate() {
            tracing::error!(path = %args.snapshot.display(), "malformed snapshot: {e}");
            return Ok(EXIT_MALFORMED);
        }
    }
    let now = args.now.as_deref().map(|raw| resolve_now(Some(raw))).transpose()?;
    let report = ResolveReport::build(&snapshot, config, now);
    emit(&render(&report, args.format, render_text)?);
    Ok(0)
}
