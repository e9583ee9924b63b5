//! Dashboard aggregation: every projection of one case, computed once from
//! one resolution.

use lexcase_core::{CaseId, Timestamp};
use serde::Serialize;

use crate::action::{next_action, ActionAdvice, ViewerRole};
use crate::config::EngineConfig;
use crate::presentation::StatusPresentation;
use crate::progress::{lifecycle_progress, ProgressMetrics};
use crate::resolver::{detect_drift, explain_resolution, ResolutionRule, StatusDrift};
use crate::sla::{calculate_sla, SlaMetrics};
use crate::snapshot::{CaseSnapshot, SnapshotError};
use crate::status::LifecycleStatus;
use crate::triage::{dashboard_bucket, urgency_score, DashboardBucket};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifecycleSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
    pub status: LifecycleStatus,
    /// Resolver rule that produced `status`.
    pub rule: ResolutionRule,
    pub presentation: StatusPresentation,
    pub progress: ProgressMetrics,
    pub sla: SlaMetrics,
    pub bucket: DashboardBucket,
    pub urgency_score: u32,
    /// Advice on the client's screen.
    pub next_action: ActionAdvice,
    /// Advice on the assigned lawyer's screen.
    pub lawyer_action: ActionAdvice,
    pub is_terminal: bool,
    /// Set when the stored status column disagrees with `status`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift: Option<StatusDrift>,
    /// `sha256:<hex>` over the canonical snapshot; absent if the snapshot
    /// could not be canonicalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_digest: Option<String>,
}

/// Validate, resolve and project one snapshot.
///
/// # Errors
///
/// Returns [`SnapshotError`] for contradictory snapshots.
pub fn summarize(
    snapshot: &CaseSnapshot,
    now: Timestamp,
    config: &EngineConfig,
) -> Result<LifecycleSummary, SnapshotError> {
    snapshot.validate()?;
    let resolution = explain_resolution(snapshot);
    let status = resolution.status;

    let drift = detect_drift(snapshot, status);
    if let Some(drift) = &drift {
        tracing::warn!(
            case_id = ?snapshot.case_id,
            stored = %drift.stored,
            %status,
            "stored status disagrees with resolved status"
        );
    }

    let snapshot_digest = match snapshot.content_digest() {
        Ok(digest) => Some(digest.to_string()),
        Err(e) => {
            tracing::warn!(case_id = ?snapshot.case_id, error = %e, "snapshot digest unavailable");
            None
        }
    };

    let sla = calculate_sla(snapshot, status, now, &config.sla);
    Ok(LifecycleSummary {
        case_id: snapshot.case_id,
        status,
        rule: resolution.rule,
        presentation: config.presentation.get(status).clone(),
        progress: lifecycle_progress(snapshot, status),
        bucket: dashboard_bucket(status, &sla),
        urgency_score: urgency_score(snapshot.priority, status, &sla),
        next_action: next_action(ViewerRole::Client, snapshot, status),
        lawyer_action: next_action(ViewerRole::Lawyer, snapshot, status),
        is_terminal: status.is_terminal(),
        sla,
        drift,
        snapshot_digest,
    })
}

/// Summarize a batch, most urgent first. Ties keep input order.
///
/// # Errors
///
/// Fails on the first contradictory snapshot.
pub fn summarize_all(
    snapshots: &[CaseSnapshot],
    now: Timestamp,
    config: &EngineConfig,
) -> Result<Vec<LifecycleSummary>, SnapshotError> {
    let mut summaries = snapshots
        .iter()
        .map(|snapshot| summarize(snapshot, now, config))
        .collect::<Result<Vec<_>, _>>()?;
    summaries.sort_by(|a, b| b.urgency_score.cmp(&a.urgency_score));
    Ok(summaries)
}
