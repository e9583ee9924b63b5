//! # Progress Projector
//!
//! Projects a resolved status onto a fixed seven-step backbone for the
//! step-indexed progress displays.
//!
//! ```text
//! 1 Draft ─ 2 Submitted ─ 3 Assigned ─ 4 In Review ─ 5 Opinion Ready ─ 6 Delivered ─ 7 Completed
//!              │
//!              └─ "Posted" / "Claimed" on marketplace cases (same slot, no extra steps)
//! ```
//!
//! - `clarification_pending` does not consume a step. It sits on the step
//!   the case occupied when the clarification arose and flags it as needing
//!   attention.
//! - `cancelled` / `archived` render as a fixed closed view with
//!   `current_step == total_steps` and no step marked complete, so a closed
//!   case never reads as partially done.
//! - The summary `label` is chosen by status and may be more specific than
//!   the backbone step.

use serde::{Deserialize, Serialize};

use crate::snapshot::CaseSnapshot;
use crate::status::LifecycleStatus;

/// One slot of the progress backbone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Draft,
    Submitted,
    Assigned,
    InReview,
    OpinionReady,
    Delivered,
    Completed,
}

/// The backbone, in display order.
pub const BACKBONE: [StepId; 7] = [
    StepId::Draft,
    StepId::Submitted,
    StepId::Assigned,
    StepId::InReview,
    StepId::OpinionReady,
    StepId::Delivered,
    StepId::Completed,
];

impl StepId {
    /// Zero-based position on the backbone.
    pub fn position(&self) -> usize {
        match self {
            Self::Draft => 0,
            Self::Submitted => 1,
            Self::Assigned => 2,
            Self::InReview => 3,
            Self::OpinionReady => 4,
            Self::Delivered => 5,
            Self::Completed => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Assigned => "Assigned",
            Self::InReview => "In Review",
            Self::OpinionReady => "Opinion Ready",
            Self::Delivered => "Delivered",
            Self::Completed => "Completed",
        }
    }
}

/// A single rendered step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStep {
    pub id: StepId,
    pub label: String,
    pub is_complete: bool,
    pub is_current: bool,
    /// The step is current but blocked on someone other than the lawyer.
    pub needs_attention: bool,
}

/// Step-indexed progress view. Computed fresh on every call; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressMetrics {
    /// One-based index of the current step.
    pub current_step: usize,
    pub total_steps: usize,
    pub steps: Vec<ProgressStep>,
    /// Short human-readable summary for the status.
    pub label: String,
    pub is_terminal: bool,
    /// Rounded `current_step / total_steps` as a percentage.
    pub progress_percent: u8,
}

/// Project `status` onto the progress backbone.
///
/// `snapshot` supplies the context the status alone does not carry: whether
/// the case came through the marketplace, and which step a clarification
/// interrupted.
pub fn lifecycle_progress(snapshot: &CaseSnapshot, status: LifecycleStatus) -> ProgressMetrics {
    let total_steps = BACKBONE.len();
    let label = progress_label(status).to_string();

    if status.is_closed() {
        tracing::trace!(%status, "closed progress rendering");
        return ProgressMetrics {
            current_step: total_steps,
            total_steps,
            steps: render_steps(snapshot, status, None, false),
            label,
            is_terminal: true,
            progress_percent: 100,
        };
    }

    let current = current_step(snapshot, status);
    let needs_attention = status == LifecycleStatus::ClarificationPending;
    let is_terminal = status.is_terminal();
    let highlighted = if is_terminal { None } else { Some(current) };
    tracing::trace!(%status, step = current.label(), needs_attention, "progress projected");

    let current_step = current.position() + 1;
    ProgressMetrics {
        current_step,
        total_steps,
        steps: render_steps(snapshot, status, highlighted, needs_attention),
        label,
        is_terminal,
        progress_percent: percent(current_step, total_steps),
    }
}

/// The backbone step a non-closed status occupies.
fn current_step(snapshot: &CaseSnapshot, status: LifecycleStatus) -> StepId {
    match status {
        LifecycleStatus::Draft => StepId::Draft,
        LifecycleStatus::Submitted
        | LifecycleStatus::MarketplacePosted
        | LifecycleStatus::Claimed => StepId::Submitted,
        LifecycleStatus::Assigned => StepId::Assigned,
        LifecycleStatus::ClarificationPending => clarification_anchor(snapshot),
        LifecycleStatus::InReview => StepId::InReview,
        LifecycleStatus::OpinionReady => StepId::OpinionReady,
        LifecycleStatus::Delivered => StepId::Delivered,
        LifecycleStatus::Completed
        | LifecycleStatus::Archived
        | LifecycleStatus::Cancelled => StepId::Completed,
    }
}

/// The step the case was on before the clarification arose.
fn clarification_anchor(snapshot: &CaseSnapshot) -> StepId {
    if snapshot.is_assigned && snapshot.has_opinion_work() {
        StepId::InReview
    } else if snapshot.is_assigned {
        StepId::Assigned
    } else if snapshot.is_claimed || snapshot.is_marketplace_posted || snapshot.has_left_drafting()
    {
        StepId::Submitted
    } else {
        StepId::Draft
    }
}

fn is_marketplace_case(snapshot: &CaseSnapshot, status: LifecycleStatus) -> bool {
    snapshot.is_marketplace_posted
        || snapshot.is_claimed
        || matches!(
            status,
            LifecycleStatus::MarketplacePosted | LifecycleStatus::Claimed
        )
}

fn step_label(step: StepId, snapshot: &CaseSnapshot, status: LifecycleStatus) -> &'static str {
    if step != StepId::Submitted || !is_marketplace_case(snapshot, status) {
        return step.label();
    }
    if status == LifecycleStatus::Claimed || snapshot.is_claimed {
        "Claimed"
    } else {
        "Posted"
    }
}

fn render_steps(
    snapshot: &CaseSnapshot,
    status: LifecycleStatus,
    current: Option<StepId>,
    needs_attention: bool,
) -> Vec<ProgressStep> {
    BACKBONE
        .iter()
        .map(|&step| {
            let is_complete = match status {
                LifecycleStatus::Completed => true,
                LifecycleStatus::Archived | LifecycleStatus::Cancelled => false,
                _ => current.is_some_and(|c| step.position() < c.position()),
            };
            let is_current = current == Some(step);
            ProgressStep {
                id: step,
                label: step_label(step, snapshot, status).to_string(),
                is_complete,
                is_current,
                needs_attention: is_current && needs_attention,
            }
        })
        .collect()
}

fn percent(current_step: usize, total_steps: usize) -> u8 {
    if total_steps == 0 {
        return 0;
    }
    let rounded = (current_step * 100 + total_steps / 2) / total_steps;
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Status-specific summary shown next to the step display.
pub fn progress_label(status: LifecycleStatus) -> &'static str {
    match status {
        LifecycleStatus::Draft => "Finish and submit your request",
        LifecycleStatus::Submitted => "Finding the right lawyer",
        LifecycleStatus::MarketplacePosted => "Posted to the marketplace",
        LifecycleStatus::Claimed => "A lawyer has claimed your request",
        LifecycleStatus::Assigned => "Lawyer reviewing case details",
        LifecycleStatus::ClarificationPending => "Awaiting your response",
        LifecycleStatus::InReview => "Opinion in progress",
        LifecycleStatus::OpinionReady => "Opinion ready for review",
        LifecycleStatus::Delivered => "Opinion delivered",
        LifecycleStatus::Completed => "Case completed",
        LifecycleStatus::Archived => "Case archived",
        LifecycleStatus::Cancelled => "Case cancelled",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::OpinionVersionSummary;

    fn current(metrics: &ProgressMetrics) -> Vec<StepId> {
        metrics.steps.iter().filter(|s| s.is_current).map(|s| s.id).collect()
    }

    #[test]
    fn test_draft_is_first_step() {
        let p = lifecycle_progress(&CaseSnapshot::default(), LifecycleStatus::Draft);
        assert_eq!(p.current_step, 1);
        assert_eq!(p.total_steps, 7);
        assert_eq!(current(&p), vec![StepId::Draft]);
        assert!(p.steps.iter().all(|s| !s.is_complete));
        assert!(!p.is_terminal);
        assert_eq!(p.progress_percent, 14);
    }

    #[test]
    fn test_in_review_marks_prior_steps_complete() {
        let p = lifecycle_progress(&CaseSnapshot::default(), LifecycleStatus::InReview);
        assert_eq!(p.current_step, 4);
        let complete: Vec<_> = p.steps.iter().filter(|s| s.is_complete).map(|s| s.id).collect();
        assert_eq!(
            complete,
            vec![StepId::Draft, StepId::Submitted, StepId::Assigned]
        );
        assert_eq!(p.label, "Opinion in progress");
    }

    #[test]
    fn test_marketplace_statuses_share_submitted_slot() {
        let snap = CaseSnapshot {
            is_marketplace_posted: true,
            ..Default::default()
        };
        let posted = lifecycle_progress(&snap, LifecycleStatus::MarketplacePosted);
        assert_eq!(posted.current_step, 2);
        assert_eq!(posted.steps[1].label, "Posted");
        assert_eq!(posted.total_steps, 7);

        let claimed_snap = CaseSnapshot {
            is_claimed: true,
            ..snap
        };
        let claimed = lifecycle_progress(&claimed_snap, LifecycleStatus::Claimed);
        assert_eq!(claimed.current_step, 2);
        assert_eq!(claimed.steps[1].label, "Claimed");
        assert_eq!(claimed.total_steps, posted.total_steps);
    }

    #[test]
    fn test_direct_case_keeps_submitted_label() {
        let snap = CaseSnapshot {
            is_assigned: true,
            ..Default::default()
        };
        let p = lifecycle_progress(&snap, LifecycleStatus::Assigned);
        assert_eq!(p.steps[1].label, "Submitted");
        assert_eq!(p.current_step, 3);
    }

    #[test]
    fn test_clarification_on_assigned_case() {
        let snap = CaseSnapshot {
            is_assigned: true,
            open_clarification_count: 1,
            ..Default::default()
        };
        let p = lifecycle_progress(&snap, LifecycleStatus::ClarificationPending);
        assert_eq!(p.current_step, 3);
        let step = &p.steps[2];
        assert_eq!(step.id, StepId::Assigned);
        assert!(step.is_current && step.needs_attention && !step.is_complete);
        assert!(!p.steps[3].is_complete);
        assert_eq!(p.label, "Awaiting your response");
    }

    #[test]
    fn test_clarification_during_drafting() {
        let snap = CaseSnapshot {
            is_assigned: true,
            open_clarification_count: 2,
            latest_opinion_version: Some(OpinionVersionSummary::draft(1)),
            ..Default::default()
        };
        let p = lifecycle_progress(&snap, LifecycleStatus::ClarificationPending);
        assert_eq!(p.current_step, 4);
        assert!(p.steps[3].needs_attention);
        assert_eq!(
            p.steps.iter().filter(|s| s.needs_attention).count(),
            1
        );
    }

    #[test]
    fn test_completed_marks_everything_complete() {
        let p = lifecycle_progress(&CaseSnapshot::default(), LifecycleStatus::Completed);
        assert_eq!(p.current_step, p.total_steps);
        assert!(p.steps.iter().all(|s| s.is_complete && !s.is_current));
        assert!(p.is_terminal);
        assert_eq!(p.progress_percent, 100);
    }

    #[test]
    fn test_cancelled_renders_closed() {
        let snap = CaseSnapshot {
            is_assigned: true,
            is_cancelled: true,
            ..Default::default()
        };
        let p = lifecycle_progress(&snap, LifecycleStatus::Cancelled);
        assert_eq!(p.current_step, p.total_steps);
        assert!(p.is_terminal);
        assert!(p.steps.iter().all(|s| !s.is_complete && !s.is_current));
        assert_eq!(p.label, "Case cancelled");
    }

    #[test]
    fn test_archived_label_distinct_from_cancelled() {
        let archived = lifecycle_progress(&CaseSnapshot::default(), LifecycleStatus::Archived);
        let cancelled = lifecycle_progress(&CaseSnapshot::default(), LifecycleStatus::Cancelled);
        assert_ne!(archived.label, cancelled.label);
        assert_eq!(archived.current_step, cancelled.current_step);
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(1, 7), 14);
        assert_eq!(percent(4, 7), 57);
        assert_eq!(percent(7, 7), 100);
        assert_eq!(percent(0, 0), 0);
    }
}
