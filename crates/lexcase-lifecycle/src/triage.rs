//! Dashboard triage: which bucket a case sits in and how urgently it should
//! be surfaced.

use serde::{Deserialize, Serialize};

use crate::sla::{SlaMetrics, SlaStatus};
use crate::snapshot::CasePriority;
use crate::status::LifecycleStatus;

/// Dashboard grouping of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardBucket {
    /// The client must act before the case can move.
    ActionNeeded,
    /// Deadline overdue or at risk.
    SlaRisk,
    Active,
    Completed,
}

impl DashboardBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionNeeded => "action_needed",
            Self::SlaRisk => "sla_risk",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for DashboardBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_sla_risk(sla: &SlaMetrics) -> bool {
    matches!(sla.status, SlaStatus::Overdue | SlaStatus::AtRisk)
}

/// Assign a case to a dashboard bucket. Client action outranks SLA risk.
pub fn dashboard_bucket(status: LifecycleStatus, sla: &SlaMetrics) -> DashboardBucket {
    if status.is_terminal() {
        return DashboardBucket::Completed;
    }
    match status {
        LifecycleStatus::ClarificationPending | LifecycleStatus::OpinionReady => {
            DashboardBucket::ActionNeeded
        }
        _ if is_sla_risk(sla) => DashboardBucket::SlaRisk,
        _ => DashboardBucket::Active,
    }
}

fn priority_weight(priority: Option<CasePriority>) -> u32 {
    match priority {
        Some(CasePriority::Urgent) => 100,
        Some(CasePriority::High) => 75,
        Some(CasePriority::Medium) => 50,
        Some(CasePriority::Low) => 25,
        None => 0,
    }
}

/// Sort key for dashboards; higher is more urgent. Terminal cases score 0.
pub fn urgency_score(
    priority: Option<CasePriority>,
    status: LifecycleStatus,
    sla: &SlaMetrics,
) -> u32 {
    if status.is_terminal() {
        return 0;
    }
    let sla_weight = match sla.status {
        SlaStatus::Overdue => 200,
        SlaStatus::AtRisk => 150,
        _ => 0,
    };
    let status_weight = match status {
        LifecycleStatus::ClarificationPending => 100,
        LifecycleStatus::OpinionReady => 50,
        _ => 0,
    };
    priority_weight(priority) + sla_weight + status_weight
}
