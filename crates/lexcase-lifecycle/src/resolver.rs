//! # Lifecycle Resolver
//!
//! Derives the one canonical [`LifecycleStatus`] of a case from a
//! [`CaseSnapshot`]. The stored status column is treated as a cache that may
//! lag; the resolver reconstructs what it should say from the independent
//! facts in the snapshot.
//!
//! ## Rule chain
//!
//! Rules are evaluated top to bottom and the first match wins. Priority
//! encodes business intent, not enum order:
//!
//! | # | Rule | Status |
//! |---|------|--------|
//! |  1 | cancelled / archived marker | `cancelled` / `archived` |
//! |  2 | signed, delivered, acknowledged, nothing reopened since | `completed` |
//! |  3 | signed and delivered | `delivered` |
//! |  4 | latest opinion version is final | `opinion_ready` |
//! |  5 | open clarification threads | `clarification_pending` |
//! |  6 | assigned with a draft opinion | `in_review` |
//! |  7 | assigned | `assigned` |
//! |  8 | claimed from the marketplace | `claimed` |
//! |  9 | posted to the marketplace | `marketplace_posted` |
//! | 10 | left the drafting stage | `submitted` |
//! | 11 | default | `draft` |
//!
//! The audit trail is consulted only for rules 2 and 3: whether the client
//! acknowledged the delivered opinion, and whether work was reopened after
//! delivery, are events rather than stored flags.
//!
//! ## Purity
//!
//! No clock, no I/O, no shared state. Identical snapshots always resolve to
//! identical statuses, which is what makes caching on
//! [`CaseSnapshot::content_digest`] sound.

use serde::{Deserialize, Serialize};

use crate::snapshot::{CaseSnapshot, SnapshotError, StoredStatus};
use crate::status::LifecycleStatus;

/// The rule that decided a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionRule {
    CancelledMarker,
    ArchivedMarker,
    Completion,
    Delivery,
    FinalizedOpinion,
    OpenClarification,
    DraftOpinion,
    Assignment,
    MarketplaceClaim,
    MarketplacePosting,
    Submission,
    Default,
}

impl ResolutionRule {
    /// Position in the rule chain (1 = highest priority).
    pub fn priority(&self) -> u8 {
        match self {
            Self::CancelledMarker | Self::ArchivedMarker => 1,
            Self::Completion => 2,
            Self::Delivery => 3,
            Self::FinalizedOpinion => 4,
            Self::OpenClarification => 5,
            Self::DraftOpinion => 6,
            Self::Assignment => 7,
            Self::MarketplaceClaim => 8,
            Self::MarketplacePosting => 9,
            Self::Submission => 10,
            Self::Default => 11,
        }
    }

    /// The status this rule produces.
    pub fn status(&self) -> LifecycleStatus {
        match self {
            Self::CancelledMarker => LifecycleStatus::Cancelled,
            Self::ArchivedMarker => LifecycleStatus::Archived,
            Self::Completion => LifecycleStatus::Completed,
            Self::Delivery => LifecycleStatus::Delivered,
            Self::FinalizedOpinion => LifecycleStatus::OpinionReady,
            Self::OpenClarification => LifecycleStatus::ClarificationPending,
            Self::DraftOpinion => LifecycleStatus::InReview,
            Self::Assignment => LifecycleStatus::Assigned,
            Self::MarketplaceClaim => LifecycleStatus::Claimed,
            Self::MarketplacePosting => LifecycleStatus::MarketplacePosted,
            Self::Submission => LifecycleStatus::Submitted,
            Self::Default => LifecycleStatus::Draft,
        }
    }

    /// One-line explanation for support tooling.
    pub fn description(&self) -> &'static str {
        match self {
            Self::CancelledMarker => "case carries an explicit cancellation marker",
            Self::ArchivedMarker => "case carries an explicit archive marker",
            Self::Completion => {
                "signed opinion delivered and acknowledged with no later reopening"
            }
            Self::Delivery => "signed opinion delivered, awaiting client acknowledgement",
            Self::FinalizedOpinion => "latest opinion version has left draft state",
            Self::OpenClarification => "unresolved clarification threads block progress",
            Self::DraftOpinion => "assigned lawyer has a draft opinion in progress",
            Self::Assignment => "lawyer assigned, no opinion work recorded",
            Self::MarketplaceClaim => "marketplace lawyer claimed the request",
            Self::MarketplacePosting => "request posted to the marketplace",
            Self::Submission => "request has left the drafting stage",
            Self::Default => "no submission recorded",
        }
    }
}

impl std::fmt::Display for ResolutionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rule {} ({})", self.priority(), self.description())
    }
}

type Predicate = fn(&CaseSnapshot) -> bool;

/// The ordered chain. [`ResolutionRule::Default`] is the implicit fallback.
const RULE_CHAIN: [(ResolutionRule, Predicate); 11] = [
    (ResolutionRule::CancelledMarker, |s| s.is_cancelled),
    (ResolutionRule::ArchivedMarker, |s| s.is_archived),
    (ResolutionRule::Completion, |s| {
        s.is_opinion_signed && s.is_delivered && s.is_acknowledged() && !s.has_action_after_delivery()
    }),
    (ResolutionRule::Delivery, |s| s.is_opinion_signed && s.is_delivered),
    (ResolutionRule::FinalizedOpinion, CaseSnapshot::has_finalized_opinion),
    (ResolutionRule::OpenClarification, |s| s.open_clarification_count > 0),
    (ResolutionRule::DraftOpinion, |s| s.is_assigned && s.has_opinion_work()),
    (ResolutionRule::Assignment, |s| s.is_assigned),
    (ResolutionRule::MarketplaceClaim, |s| s.is_claimed),
    (ResolutionRule::MarketplacePosting, |s| s.is_marketplace_posted),
    (ResolutionRule::Submission, CaseSnapshot::has_left_drafting),
];

/// A resolved status together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub status: LifecycleStatus,
    pub rule: ResolutionRule,
}

/// Resolve a snapshot and report which rule decided it.
pub fn explain_resolution(snapshot: &CaseSnapshot) -> Resolution {
    let rule = RULE_CHAIN
        .iter()
        .find(|(_, applies)| applies(snapshot))
        .map(|(rule, _)| *rule)
        .unwrap_or(ResolutionRule::Default);
    let status = rule.status();
    tracing::debug!(
        case_id = ?snapshot.case_id,
        %status,
        rule = rule.priority(),
        "lifecycle status resolved"
    );
    Resolution { status, rule }
}

/// Resolve the canonical lifecycle status of a case.
///
/// Total over every value of [`CaseSnapshot`]: it never panics, even for
/// snapshots that fail [`CaseSnapshot::validate`]. Use
/// [`try_resolve_lifecycle_status`] to fail fast on contradictory input.
pub fn resolve_lifecycle_status(snapshot: &CaseSnapshot) -> LifecycleStatus {
    explain_resolution(snapshot).status
}

/// Validate the snapshot, then resolve it.
///
/// # Errors
///
/// Returns [`SnapshotError`] when the snapshot's fields contradict each
/// other. That is an assembly defect; guessing a status would hide it.
pub fn try_resolve_lifecycle_status(
    snapshot: &CaseSnapshot,
) -> Result<LifecycleStatus, SnapshotError> {
    snapshot.validate()?;
    Ok(resolve_lifecycle_status(snapshot))
}

/// The stored status column disagrees with the resolved status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDrift {
    /// Raw value of the column.
    pub stored: StoredStatus,
    /// The column's canonical reading, if it is a recognized value.
    pub stored_reading: Option<LifecycleStatus>,
    /// What the column should say.
    pub resolved: LifecycleStatus,
}

/// Compare the stored status column against a resolved status.
///
/// Returns `None` when the column is absent or agrees.
pub fn detect_drift(snapshot: &CaseSnapshot, resolved: LifecycleStatus) -> Option<StatusDrift> {
    let stored = snapshot.stored_status.as_ref()?;
    let stored_reading = stored.canonical_reading();
    if stored_reading == Some(resolved) {
        return None;
    }
    Some(StatusDrift {
        stored: stored.clone(),
        stored_reading,
        resolved,
    })
}
