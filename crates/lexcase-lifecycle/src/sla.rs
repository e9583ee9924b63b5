//! # SLA Projection
//!
//! Classifies a case against its SLA deadline at a caller-supplied instant.
//! The clock is a parameter, so the projection is as pure as the resolver:
//! the same `(snapshot, status, now, policy)` always yields the same metrics.
//!
//! | Condition | Status | Text |
//! |-----------|--------|------|
//! | delivered or terminal | `completed` | "Delivered" / "Closed" |
//! | no deadline | `none` | "No Deadline" |
//! | deadline passed | `overdue` | "Overdue by 3 days" |
//! | inside the at-risk window | `at_risk` | "Due in 5h" |
//! | otherwise | `on_track` | "Due in 2d" |

use lexcase_core::Timestamp;
use serde::{Deserialize, Serialize};

use crate::snapshot::CaseSnapshot;
use crate::status::LifecycleStatus;

const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

/// SLA thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlaPolicy {
    /// A deadline closer than this many hours is at risk.
    pub at_risk_window_hours: u32,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            at_risk_window_hours: 24,
        }
    }
}

/// SLA health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    /// The clock stopped: the opinion was delivered or the case closed.
    Completed,
    /// No deadline recorded.
    None,
    Overdue,
    AtRisk,
    OnTrack,
}

impl SlaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::None => "none",
            Self::Overdue => "overdue",
            Self::AtRisk => "at_risk",
            Self::OnTrack => "on_track",
        }
    }
}

impl std::fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SLA view of one case at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaMetrics {
    pub status: SlaStatus,
    /// Short display text.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<Timestamp>,
    /// When the clock stopped, if the snapshot records it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<Timestamp>,
    /// Signed seconds until the deadline; negative once overdue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_remaining: Option<i64>,
    pub is_overdue: bool,
    pub is_at_risk: bool,
}

impl SlaMetrics {
    fn stopped(snapshot: &CaseSnapshot, text: &str) -> Self {
        Self {
            status: SlaStatus::Completed,
            text: text.to_string(),
            due_at: snapshot.sla_deadline,
            delivered_at: snapshot.completed_at,
            seconds_remaining: None,
            is_overdue: false,
            is_at_risk: false,
        }
    }

    fn running(status: SlaStatus, text: String, deadline: Timestamp, remaining: i64) -> Self {
        Self {
            status,
            text,
            due_at: Some(deadline),
            delivered_at: None,
            seconds_remaining: Some(remaining),
            is_overdue: status == SlaStatus::Overdue,
            is_at_risk: status == SlaStatus::AtRisk,
        }
    }
}

/// Project the SLA state of a case at `now`.
pub fn calculate_sla(
    snapshot: &CaseSnapshot,
    status: LifecycleStatus,
    now: Timestamp,
    policy: &SlaPolicy,
) -> SlaMetrics {
    if status.is_closed() {
        return SlaMetrics::stopped(snapshot, "Closed");
    }
    if status.is_terminal() || status == LifecycleStatus::Delivered {
        return SlaMetrics::stopped(snapshot, "Delivered");
    }
    let Some(deadline) = snapshot.sla_deadline else {
        return SlaMetrics {
            status: SlaStatus::None,
            text: "No Deadline".to_string(),
            due_at: None,
            delivered_at: None,
            seconds_remaining: None,
            is_overdue: false,
            is_at_risk: false,
        };
    };

    let remaining = now.until(&deadline).num_seconds();
    let window = i64::from(policy.at_risk_window_hours) * SECS_PER_HOUR;

    let metrics = if remaining < 0 {
        SlaMetrics::running(SlaStatus::Overdue, overdue_text(-remaining), deadline, remaining)
    } else if remaining < window {
        let text = if remaining == 0 {
            "Due now".to_string()
        } else {
            format!("Due in {}h", ceil_div(remaining, SECS_PER_HOUR))
        };
        SlaMetrics::running(SlaStatus::AtRisk, text, deadline, remaining)
    } else {
        let text = format!("Due in {}d", ceil_div(remaining.max(1), SECS_PER_DAY));
        SlaMetrics::running(SlaStatus::OnTrack, text, deadline, remaining)
    };
    tracing::trace!(%status, sla = %metrics.status, remaining, "sla projected");
    metrics
}

fn overdue_text(overdue_secs: i64) -> String {
    if overdue_secs >= SECS_PER_DAY {
        let days = overdue_secs / SECS_PER_DAY;
        format!("Overdue by {days} {}", plural(days, "day"))
    } else {
        let hours = ceil_div(overdue_secs, SECS_PER_HOUR);
        format!("Overdue by {hours} {}", plural(hours, "hour"))
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// Ceiling division for a positive numerator.
fn ceil_div(n: i64, d: i64) -> i64 {
    (n + d - 1) / d
}
