//! # Case Snapshot
//!
//! The immutable, point-in-time fact set the resolver consumes. A snapshot is
//! assembled by the surrounding data-access layer from the request row, the
//! audit trail, opinion versions and clarification threads; this module only
//! defines its shape and what "well-formed" means.
//!
//! ## Raw columns
//!
//! Two fields carry free-form strings written by many code paths: the
//! request's stored status column and audit actions. Both are parsed into
//! closed enums with an escape variant that preserves the raw text, so the
//! resolver can match exhaustively while unknown values still round-trip.

use serde::{Deserialize, Serialize};

use lexcase_core::{
    sha256_digest, CanonicalBytes, CanonicalizationError, CaseId, ContentDigest, Timestamp,
};

use crate::status::LifecycleStatus;

// ─── Stored Status Column ────────────────────────────────────────────

/// The request row's own `status` column.
///
/// A hint, never authoritative. Several independent write paths update it
/// and it is known to lag behind the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoredStatus {
    Draft,
    Submitted,
    PendingLawyerResponse,
    Open,
    Claimed,
    Assigned,
    Accepted,
    InProgress,
    Drafting,
    InReview,
    ClarificationRequested,
    OpinionReady,
    Delivered,
    ClientReview,
    Completed,
    CaseClosed,
    ClientAcknowledged,
    NoFurtherQueriesConfirmed,
    Archived,
    Cancelled,
    /// A value this build does not know. The raw text is preserved.
    Unrecognized(String),
}

impl StoredStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::PendingLawyerResponse => "pending_lawyer_response",
            Self::Open => "open",
            Self::Claimed => "claimed",
            Self::Assigned => "assigned",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Drafting => "drafting",
            Self::InReview => "in_review",
            Self::ClarificationRequested => "clarification_requested",
            Self::OpinionReady => "opinion_ready",
            Self::Delivered => "delivered",
            Self::ClientReview => "client_review",
            Self::Completed => "completed",
            Self::CaseClosed => "case_closed",
            Self::ClientAcknowledged => "client_acknowledged",
            Self::NoFurtherQueriesConfirmed => "no_further_queries_confirmed",
            Self::Archived => "archived",
            Self::Cancelled => "cancelled",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// What the column claims, expressed as a lifecycle status.
    ///
    /// Legacy aliases collapse onto their canonical status. Returns `None`
    /// for unrecognized values.
    pub fn canonical_reading(&self) -> Option<LifecycleStatus> {
        let status = match self {
            Self::Draft => LifecycleStatus::Draft,
            Self::Submitted | Self::PendingLawyerResponse => LifecycleStatus::Submitted,
            Self::Open => LifecycleStatus::MarketplacePosted,
            Self::Claimed => LifecycleStatus::Claimed,
            Self::Assigned | Self::Accepted => LifecycleStatus::Assigned,
            Self::ClarificationRequested => LifecycleStatus::ClarificationPending,
            Self::InProgress | Self::Drafting | Self::InReview => LifecycleStatus::InReview,
            Self::OpinionReady => LifecycleStatus::OpinionReady,
            Self::Delivered | Self::ClientReview => LifecycleStatus::Delivered,
            Self::Completed
            | Self::CaseClosed
            | Self::ClientAcknowledged
            | Self::NoFurtherQueriesConfirmed => LifecycleStatus::Completed,
            Self::Archived => LifecycleStatus::Archived,
            Self::Cancelled => LifecycleStatus::Cancelled,
            Self::Unrecognized(_) => return None,
        };
        Some(status)
    }

    /// Whether the column shows the request has left the drafting stage.
    ///
    /// Only recognized values count; an unknown string is not evidence.
    pub fn has_left_drafting(&self) -> bool {
        self.canonical_reading()
            .is_some_and(|status| status != LifecycleStatus::Draft)
    }
}

impl From<String> for StoredStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "draft" => Self::Draft,
            "submitted" => Self::Submitted,
            "pending_lawyer_response" => Self::PendingLawyerResponse,
            "open" => Self::Open,
            "claimed" => Self::Claimed,
            "assigned" => Self::Assigned,
            "accepted" => Self::Accepted,
            "in_progress" => Self::InProgress,
            "drafting" => Self::Drafting,
            "in_review" => Self::InReview,
            "clarification_requested" => Self::ClarificationRequested,
            "opinion_ready" => Self::OpinionReady,
            "delivered" => Self::Delivered,
            "client_review" => Self::ClientReview,
            "completed" => Self::Completed,
            "case_closed" => Self::CaseClosed,
            "client_acknowledged" => Self::ClientAcknowledged,
            "no_further_queries_confirmed" => Self::NoFurtherQueriesConfirmed,
            "archived" => Self::Archived,
            "cancelled" => Self::Cancelled,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for StoredStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<StoredStatus> for String {
    fn from(status: StoredStatus) -> Self {
        match status {
            StoredStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for StoredStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Audit Trail ─────────────────────────────────────────────────────

/// The `action` column of an audit row. Actions the engine orders against
/// get a variant; everything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    OpinionDelivered,
    OpinionViewed,
    ClientAcknowledged,
    CaseClosed,
    ClarificationRequested,
    RevisionRequested,
    OpinionReopened,
    StatusChanged,
    Other(String),
}

impl AuditAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OpinionDelivered => "opinion_delivered",
            Self::OpinionViewed => "opinion_viewed",
            Self::ClientAcknowledged => "client_acknowledged",
            Self::CaseClosed => "case_closed",
            Self::ClarificationRequested => "clarification_requested",
            Self::RevisionRequested => "revision_requested",
            Self::OpinionReopened => "opinion_reopened",
            Self::StatusChanged => "status_changed",
            Self::Other(raw) => raw,
        }
    }

    /// Actions that reopen work on an already-delivered opinion.
    pub fn reopens_work(&self) -> bool {
        matches!(
            self,
            Self::ClarificationRequested | Self::RevisionRequested | Self::OpinionReopened
        )
    }
}

impl From<String> for AuditAction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "opinion_delivered" => Self::OpinionDelivered,
            "opinion_viewed" => Self::OpinionViewed,
            "client_acknowledged" => Self::ClientAcknowledged,
            "case_closed" | "completed" => Self::CaseClosed,
            "clarification_requested" => Self::ClarificationRequested,
            "revision_requested" => Self::RevisionRequested,
            "opinion_reopened" => Self::OpinionReopened,
            "status_changed" => Self::StatusChanged,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for AuditAction {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        match action {
            AuditAction::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// One row of the append-only audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<AuditAction>, timestamp: Timestamp) -> Self {
        Self {
            action: action.into(),
            timestamp,
            details: None,
        }
    }

    /// The target status of a `status_changed` event, read from
    /// `details.new_status` or `details.status`.
    pub fn new_status(&self) -> Option<StoredStatus> {
        if self.action != AuditAction::StatusChanged {
            return None;
        }
        let details = self.details.as_ref()?;
        details
            .get("new_status")
            .or_else(|| details.get("status"))
            .and_then(serde_json::Value::as_str)
            .map(StoredStatus::from)
    }

    /// Whether this event records the client acknowledging the delivered
    /// opinion (viewing it, confirming it, or the case being closed on it).
    pub fn acknowledges_delivery(&self) -> bool {
        match &self.action {
            AuditAction::OpinionViewed
            | AuditAction::ClientAcknowledged
            | AuditAction::CaseClosed => true,
            AuditAction::StatusChanged => self
                .new_status()
                .is_some_and(|s| s.canonical_reading() == Some(LifecycleStatus::Completed)),
            _ => false,
        }
    }
}

// ─── Opinion Versions ────────────────────────────────────────────────

/// Summary of the most recent opinion revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpinionVersionSummary {
    #[serde(default = "first_version")]
    pub version_number: u32,
    pub is_draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<Timestamp>,
}

fn first_version() -> u32 {
    1
}

impl OpinionVersionSummary {
    pub fn draft(version_number: u32) -> Self {
        Self {
            version_number,
            is_draft: true,
            submitted_at: None,
        }
    }

    pub fn submitted(version_number: u32, submitted_at: Timestamp) -> Self {
        Self {
            version_number,
            is_draft: false,
            submitted_at: Some(submitted_at),
        }
    }
}

// ─── Priority ────────────────────────────────────────────────────────

/// Client-selected case priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePriority {
    Low,
    Medium,
    High,
    Urgent,
}

// ─── Snapshot ────────────────────────────────────────────────────────

/// Immutable point-in-time fact set for one case.
///
/// Every field defaults, so a JSON object containing only the facts the
/// assembler knows is a valid snapshot. Unknown keys are rejected: a
/// misspelled flag must not silently read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseSnapshot {
    /// Identifier of the request, when the assembler supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
    /// The request row's status column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_status: Option<StoredStatus>,
    /// When the client submitted the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<Timestamp>,
    /// A lawyer identifier is attached.
    pub is_assigned: bool,
    pub is_marketplace_posted: bool,
    pub is_claimed: bool,
    /// Number of unresolved clarification threads.
    pub open_clarification_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_opinion_version: Option<OpinionVersionSummary>,
    /// A final digital signature has been recorded.
    pub is_opinion_signed: bool,
    /// The signed opinion has been released to the client.
    pub is_delivered: bool,
    /// The client has opened the delivered opinion.
    pub viewed_by_client: bool,
    /// Audit trail, most recent first.
    pub audit_events: Vec<AuditEvent>,
    pub is_cancelled: bool,
    pub is_archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CasePriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_deadline: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    /// The client has rated the completed case.
    pub is_rated: bool,
}

/// A snapshot whose fields contradict each other.
///
/// This is a defect in snapshot assembly, not a domain outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("opinion is marked signed but the snapshot carries no opinion version")]
    SignedWithoutOpinion,

    #[error("opinion is marked signed but latest version {version_number} is still a draft")]
    SignedDraft { version_number: u32 },

    #[error("client viewed the opinion but it is not marked delivered")]
    ViewedWithoutDelivery,

    #[error("opinion version numbers start at 1, got 0")]
    InvalidVersionNumber,
}

impl CaseSnapshot {
    /// Check the snapshot for contradictory fields.
    ///
    /// # Errors
    ///
    /// Returns the first contradiction found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if let Some(version) = &self.latest_opinion_version {
            if version.version_number == 0 {
                return Err(SnapshotError::InvalidVersionNumber);
            }
        }
        if self.is_opinion_signed {
            match &self.latest_opinion_version {
                None => return Err(SnapshotError::SignedWithoutOpinion),
                Some(version) if version.is_draft => {
                    return Err(SnapshotError::SignedDraft {
                        version_number: version.version_number,
                    })
                }
                Some(_) => {}
            }
        }
        if self.viewed_by_client && !self.is_delivered {
            return Err(SnapshotError::ViewedWithoutDelivery);
        }
        Ok(())
    }

    /// SHA-256 over the JCS canonical form of the snapshot.
    ///
    /// Identical facts yield identical digests, so callers can use this as
    /// the key of a resolution cache. Canonical form admits no floats, so
    /// non-integer numbers inside audit `details` are digested as their
    /// decimal text.
    pub fn content_digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        let mut digestible = self.clone();
        for details in digestible
            .audit_events
            .iter_mut()
            .filter_map(|e| e.details.as_mut())
        {
            stringify_floats(details);
        }
        let canonical = CanonicalBytes::new(&digestible)?;
        Ok(sha256_digest(&canonical))
    }

    /// A finalized opinion exists: the latest version is no longer a draft.
    ///
    /// Leaving draft state is the lawyer's submit-final action, so a
    /// non-draft version counts as submitted even when the assembler could
    /// not supply `submitted_at`.
    pub fn has_finalized_opinion(&self) -> bool {
        self.latest_opinion_version
            .as_ref()
            .is_some_and(|v| !v.is_draft)
    }

    /// Any opinion version exists, finalized or not.
    pub fn has_opinion_work(&self) -> bool {
        self.latest_opinion_version.is_some()
    }

    /// The request has left the drafting stage.
    pub fn has_left_drafting(&self) -> bool {
        self.submitted_at.is_some()
            || self
                .stored_status
                .as_ref()
                .is_some_and(StoredStatus::has_left_drafting)
    }

    /// Latest `opinion_delivered` instant in the audit trail.
    pub fn last_delivered_at(&self) -> Option<Timestamp> {
        self.audit_events
            .iter()
            .filter(|e| e.action == AuditAction::OpinionDelivered)
            .map(|e| e.timestamp)
            .max()
    }

    /// Latest audit instant at which the client acknowledged an opinion.
    pub fn last_acknowledged_at(&self) -> Option<Timestamp> {
        self.audit_events
            .iter()
            .filter(|e| e.acknowledges_delivery())
            .map(|e| e.timestamp)
            .max()
    }

    /// The opinion was delivered again after work on it was reopened.
    ///
    /// The stored `viewed_by_client` flag carries no instant, so once this
    /// holds it cannot vouch for the revised opinion.
    pub fn was_redelivered(&self) -> bool {
        let mut deliveries = self
            .audit_events
            .iter()
            .filter(|e| e.action == AuditAction::OpinionDelivered)
            .map(|e| e.timestamp);
        let Some(first) = deliveries.next() else {
            return false;
        };
        let (first, latest) =
            deliveries.fold((first, first), |(lo, hi), at| (lo.min(at), hi.max(at)));
        self.audit_events
            .iter()
            .any(|e| e.action.reopens_work() && e.timestamp > first && e.timestamp < latest)
    }

    /// The client has acknowledged the latest delivered opinion.
    ///
    /// An acknowledging audit event counts only if it is no earlier than the
    /// latest recorded delivery. The stored flag counts unless the trail
    /// shows a re-delivery it cannot speak for.
    pub fn is_acknowledged(&self) -> bool {
        let delivered = self.last_delivered_at();
        let acknowledged_by_event = match (delivered, self.last_acknowledged_at()) {
            (Some(delivered), Some(acknowledged)) => acknowledged >= delivered,
            (None, acknowledged) => acknowledged.is_some(),
            (Some(_), None) => false,
        };
        acknowledged_by_event || (self.viewed_by_client && !self.was_redelivered())
    }

    /// Whether the audit trail records work being reopened after the latest
    /// acknowledgement, or after the latest delivery when no acknowledgement
    /// event exists. With neither recorded there is nothing to order against
    /// and this is `false`.
    pub fn has_action_after_delivery(&self) -> bool {
        let reference = self
            .last_acknowledged_at()
            .or_else(|| self.last_delivered_at());
        let Some(reference) = reference else {
            return false;
        };
        self.audit_events
            .iter()
            .any(|e| e.action.reopens_work() && e.timestamp > reference)
    }
}

fn stringify_floats(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Number(n) if n.is_f64() => {
            *value = serde_json::Value::String(n.to_string());
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(stringify_floats),
        serde_json::Value::Object(map) => map.values_mut().for_each(stringify_floats),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_stored_status_known_roundtrip() {
        for raw in [
            "draft",
            "pending_lawyer_response",
            "clarification_requested",
            "no_further_queries_confirmed",
            "cancelled",
        ] {
            let parsed = StoredStatus::from(raw);
            assert!(!matches!(parsed, StoredStatus::Unrecognized(_)), "{raw}");
            assert_eq!(parsed.as_str(), raw);
        }
    }

    #[test]
    fn test_stored_status_unrecognized_preserves_raw() {
        let parsed = StoredStatus::from("awaiting_payment");
        assert_eq!(parsed, StoredStatus::Unrecognized("awaiting_payment".into()));
        assert_eq!(parsed.canonical_reading(), None);
        assert!(!parsed.has_left_drafting());
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, "\"awaiting_payment\"");
    }

    #[test]
    fn test_stored_status_legacy_aliases() {
        assert_eq!(
            StoredStatus::from("case_closed").canonical_reading(),
            Some(LifecycleStatus::Completed)
        );
        assert_eq!(
            StoredStatus::from("client_review").canonical_reading(),
            Some(LifecycleStatus::Delivered)
        );
        assert_eq!(
            StoredStatus::from("accepted").canonical_reading(),
            Some(LifecycleStatus::Assigned)
        );
        assert!(!StoredStatus::Draft.has_left_drafting());
        assert!(StoredStatus::Submitted.has_left_drafting());
    }

    #[test]
    fn test_audit_action_completed_alias() {
        assert_eq!(AuditAction::from("completed"), AuditAction::CaseClosed);
        // Signing is a snapshot flag; the event is kept verbatim.
        let signed = AuditAction::from("opinion_signed");
        assert_eq!(signed, AuditAction::Other("opinion_signed".into()));
        assert_eq!(String::from(signed), "opinion_signed");
        assert_eq!(
            AuditAction::from("document_uploaded"),
            AuditAction::Other("document_uploaded".into())
        );
    }

    #[test]
    fn test_status_changed_new_status() {
        let mut event = AuditEvent::new("status_changed", ts("2026-02-01T10:00:00Z"));
        event.details = Some(serde_json::json!({"old_status": "delivered", "new_status": "client_acknowledged"}));
        assert_eq!(event.new_status(), Some(StoredStatus::ClientAcknowledged));
        assert!(event.acknowledges_delivery());

        event.details = Some(serde_json::json!({"status": "in_review"}));
        assert_eq!(event.new_status(), Some(StoredStatus::InReview));
        assert!(!event.acknowledges_delivery());
    }

    #[test]
    fn test_new_status_ignored_for_other_actions() {
        let mut event = AuditEvent::new("opinion_signed", ts("2026-02-01T10:00:00Z"));
        event.details = Some(serde_json::json!({"new_status": "completed"}));
        assert_eq!(event.new_status(), None);
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(CaseSnapshot::default().validate().is_ok());
    }

    #[test]
    fn test_validate_signed_without_opinion() {
        let snap = CaseSnapshot {
            is_opinion_signed: true,
            ..Default::default()
        };
        assert_eq!(snap.validate(), Err(SnapshotError::SignedWithoutOpinion));
    }

    #[test]
    fn test_validate_signed_draft() {
        let snap = CaseSnapshot {
            is_opinion_signed: true,
            latest_opinion_version: Some(OpinionVersionSummary::draft(3)),
            ..Default::default()
        };
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::SignedDraft { version_number: 3 })
        );
    }

    #[test]
    fn test_validate_viewed_without_delivery() {
        let snap = CaseSnapshot {
            viewed_by_client: true,
            ..Default::default()
        };
        assert_eq!(snap.validate(), Err(SnapshotError::ViewedWithoutDelivery));
    }

    #[test]
    fn test_validate_version_zero() {
        let snap = CaseSnapshot {
            latest_opinion_version: Some(OpinionVersionSummary::draft(0)),
            ..Default::default()
        };
        assert_eq!(snap.validate(), Err(SnapshotError::InvalidVersionNumber));
    }

    #[test]
    fn test_finalized_opinion_is_any_non_draft_version() {
        let mut snap = CaseSnapshot {
            latest_opinion_version: Some(OpinionVersionSummary::draft(2)),
            ..Default::default()
        };
        assert!(snap.has_opinion_work());
        assert!(!snap.has_finalized_opinion());

        snap.latest_opinion_version = Some(OpinionVersionSummary {
            version_number: 2,
            is_draft: false,
            submitted_at: None,
        });
        assert!(snap.has_finalized_opinion());
    }

    #[test]
    fn test_action_after_delivery() {
        let snap = CaseSnapshot {
            audit_events: vec![
                AuditEvent::new("revision_requested", ts("2026-02-03T09:00:00Z")),
                AuditEvent::new("opinion_viewed", ts("2026-02-02T09:00:00Z")),
                AuditEvent::new("opinion_delivered", ts("2026-02-01T09:00:00Z")),
            ],
            ..Default::default()
        };
        assert_eq!(snap.last_acknowledged_at(), Some(ts("2026-02-02T09:00:00Z")));
        assert_eq!(snap.last_delivered_at(), Some(ts("2026-02-01T09:00:00Z")));
        assert!(snap.has_action_after_delivery());
    }

    #[test]
    fn test_action_before_delivery_ignored() {
        let snap = CaseSnapshot {
            audit_events: vec![
                AuditEvent::new("opinion_delivered", ts("2026-02-04T09:00:00Z")),
                AuditEvent::new("clarification_requested", ts("2026-01-20T09:00:00Z")),
            ],
            ..Default::default()
        };
        assert!(!snap.has_action_after_delivery());
    }

    #[test]
    fn test_no_delivery_activity_means_no_further_action() {
        let snap = CaseSnapshot {
            audit_events: vec![AuditEvent::new(
                "opinion_reopened",
                ts("2026-02-04T09:00:00Z"),
            )],
            ..Default::default()
        };
        assert!(!snap.has_action_after_delivery());
    }

    fn redelivered_trail() -> Vec<AuditEvent> {
        vec![
            AuditEvent::new("opinion_delivered", ts("2026-03-08T09:00:00Z")),
            AuditEvent::new("revision_requested", ts("2026-03-06T09:00:00Z")),
            AuditEvent::new("opinion_viewed", ts("2026-03-05T09:00:00Z")),
            AuditEvent::new("opinion_delivered", ts("2026-03-04T09:00:00Z")),
        ]
    }

    #[test]
    fn test_view_before_redelivery_is_not_acknowledgement() {
        let snap = CaseSnapshot {
            is_delivered: true,
            audit_events: redelivered_trail(),
            ..Default::default()
        };
        assert!(snap.was_redelivered());
        assert!(!snap.is_acknowledged());
    }

    #[test]
    fn test_stale_viewed_flag_does_not_cover_redelivery() {
        let snap = CaseSnapshot {
            is_delivered: true,
            viewed_by_client: true,
            audit_events: redelivered_trail(),
            ..Default::default()
        };
        assert!(!snap.is_acknowledged());
    }

    #[test]
    fn test_view_after_redelivery_acknowledges() {
        let mut audit_events = redelivered_trail();
        audit_events.insert(0, AuditEvent::new("opinion_viewed", ts("2026-03-09T09:00:00Z")));
        let snap = CaseSnapshot {
            is_delivered: true,
            audit_events,
            ..Default::default()
        };
        assert!(snap.is_acknowledged());
        assert!(!snap.has_action_after_delivery());
    }

    #[test]
    fn test_viewed_flag_acknowledges_single_delivery() {
        let snap = CaseSnapshot {
            is_delivered: true,
            viewed_by_client: true,
            audit_events: vec![
                AuditEvent::new("opinion_delivered", ts("2026-03-04T09:00:00Z")),
                AuditEvent::new("clarification_requested", ts("2026-03-01T09:00:00Z")),
            ],
            ..Default::default()
        };
        assert!(!snap.was_redelivered());
        assert!(snap.is_acknowledged());
        assert!(!snap.has_action_after_delivery());
    }

    #[test]
    fn test_minimal_json_deserializes() {
        let snap: CaseSnapshot =
            serde_json::from_str(r#"{"is_assigned": true, "stored_status": "in_review"}"#).unwrap();
        assert!(snap.is_assigned);
        assert_eq!(snap.stored_status, Some(StoredStatus::InReview));
        assert_eq!(snap.open_clarification_count, 0);
    }

    #[test]
    fn test_misspelled_flag_rejected_at_deserialization() {
        let raw = r#"{"is_canceled": true, "is_assigned": true}"#;
        let err = serde_json::from_str::<CaseSnapshot>(raw).unwrap_err();
        assert!(err.to_string().contains("unknown field `is_canceled`"), "{err}");

        let result: Result<CaseSnapshot, _> = serde_json::from_str(
            r#"{"latest_opinion_version": {"version_number": 2, "is_draft": false, "signed": true}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_count_rejected_at_deserialization() {
        let result: Result<CaseSnapshot, _> =
            serde_json::from_str(r#"{"open_clarification_count": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_content_digest_stable_and_sensitive() {
        let a = CaseSnapshot {
            is_assigned: true,
            open_clarification_count: 1,
            ..Default::default()
        };
        let b = a.clone();
        assert_eq!(a.content_digest().unwrap(), b.content_digest().unwrap());

        let c = CaseSnapshot {
            open_clarification_count: 2,
            ..a.clone()
        };
        assert_ne!(a.content_digest().unwrap(), c.content_digest().unwrap());
    }

    #[test]
    fn test_content_digest_accepts_float_details() {
        let with_details = |details: serde_json::Value| {
            let mut event = AuditEvent::new("document_uploaded", ts("2026-02-02T09:00:00Z"));
            event.details = Some(details);
            CaseSnapshot {
                audit_events: vec![event],
                ..Default::default()
            }
        };
        let small = with_details(serde_json::json!({"size_mb": 1.5, "pages": [2, 0.25]}));
        let digest = small.content_digest().unwrap();
        assert_eq!(digest, small.clone().content_digest().unwrap());

        let large = with_details(serde_json::json!({"size_mb": 2.5, "pages": [2, 0.25]}));
        assert_ne!(digest, large.content_digest().unwrap());
        // The snapshot itself keeps the number.
        assert_eq!(small.audit_events[0].details.as_ref().unwrap()["size_mb"], 1.5);
    }
}
