//! # lexcase-lifecycle: Lifecycle Resolution & Progress Engine
//!
//! Derives the one canonical workflow state of a legal request from a
//! point-in-time snapshot of its facts, and projects that state into the
//! views every surface renders.
//!
//! ## Components
//!
//! - **Resolver** (`resolver.rs`): `CaseSnapshot → LifecycleStatus` through
//!   an ordered rule chain. Pure and total.
//!
//! - **Progress Projector** (`progress.rs`): `(CaseSnapshot, LifecycleStatus)
//!   → ProgressMetrics` over a fixed seven-step backbone.
//!
//! - **Presentation Table** (`presentation.rs`): the shared, versioned
//!   status → label/description/terminality mapping, with a safe fallback
//!   for raw values this build does not know.
//!
//! - **SLA, triage and advice** (`sla.rs`, `triage.rs`, `action.rs`):
//!   deadline health at a caller-supplied instant, dashboard bucket and
//!   urgency score, and the "what happens next" entry per status for the
//!   client and the lawyer.
//!
//! - **Summary** (`summary.rs`): all of the above for one case, computed
//!   from a single resolution.
//!
//! ## Design
//!
//! The stored status column is a cache that may lag. Nothing here reads it
//! as truth; it only serves as evidence that a case left drafting and as the
//! comparison point for drift detection. Every status is a closed enum
//! variant, so adding one is a compile error in every consumer that has not
//! handled it.
//!
//! ```
//! use lexcase_lifecycle::{lifecycle_progress, resolve_lifecycle_status, CaseSnapshot, LifecycleStatus};
//!
//! let snapshot = CaseSnapshot { is_assigned: true, open_clarification_count: 1, ..Default::default() };
//! let status = resolve_lifecycle_status(&snapshot);
//! assert_eq!(status, LifecycleStatus::ClarificationPending);
//! assert_eq!(lifecycle_progress(&snapshot, status).current_step, 3);
//! ```

pub mod action;
pub mod config;
pub mod presentation;
pub mod progress;
pub mod resolver;
pub mod sla;
pub mod snapshot;
pub mod status;
pub mod summary;
pub mod triage;

// ─── Status and snapshot re-exports ─────────────────────────────────

pub use snapshot::{
    AuditAction, AuditEvent, CasePriority, CaseSnapshot, OpinionVersionSummary, SnapshotError,
    StoredStatus,
};
pub use status::{humanize_identifier, LifecycleStatus, UnknownStatus, LIFECYCLE_STATUS_COUNT};

// ─── Resolver re-exports ────────────────────────────────────────────

pub use resolver::{
    detect_drift, explain_resolution, resolve_lifecycle_status, try_resolve_lifecycle_status,
    Resolution, ResolutionRule, StatusDrift,
};

// ─── Projection re-exports ──────────────────────────────────────────

pub use action::{next_action, ActionActor, ActionAdvice, AdvicePriority, CaseTab, ViewerRole};
pub use presentation::{PresentationError, PresentationTable, StatusPresentation};
pub use progress::{lifecycle_progress, progress_label, ProgressMetrics, ProgressStep, StepId};
pub use sla::{calculate_sla, SlaMetrics, SlaPolicy, SlaStatus};
pub use summary::{summarize, summarize_all, LifecycleSummary};
pub use triage::{dashboard_bucket, urgency_score, DashboardBucket};

// ─── Configuration re-exports ───────────────────────────────────────

pub use config::{ConfigError, EngineConfig};
