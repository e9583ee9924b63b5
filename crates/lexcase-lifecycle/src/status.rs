//! # Lifecycle Status: Single Source of Truth
//!
//! The one definition of a case's canonical workflow state. Every consumer
//! (resolver, projector, presentation table, triage) matches on it
//! exhaustively, so adding a status is a compile error everywhere it has not
//! been handled yet.
//!
//! ```text
//! draft ─▶ submitted ─▶ marketplace_posted ─▶ claimed ─▶ assigned ─▶ in_review ─▶ opinion_ready ─▶ delivered ─▶ completed
//!                                                           │  ▲         │  ▲
//!                                                           ▼  │         ▼  │
//!                                                       clarification_pending
//!
//! archived / cancelled: terminal, reachable from any non-completed state
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Canonical workflow state of a legal request.
///
/// This is a derived value. It is never the source of truth for anything;
/// see [`crate::resolve_lifecycle_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    /// Client is still drafting the request.
    Draft,
    /// Submitted, awaiting assignment.
    Submitted,
    /// Posted to the public marketplace.
    MarketplacePosted,
    /// A marketplace lawyer claimed the request but is not yet assigned.
    Claimed,
    /// A lawyer is assigned; no opinion work recorded yet.
    Assigned,
    /// An open clarification blocks lawyer progress.
    ClarificationPending,
    /// Opinion drafting is underway.
    InReview,
    /// A finalized opinion has been submitted.
    OpinionReady,
    /// Signed opinion delivered, not yet acknowledged by the client.
    Delivered,
    /// Signed, delivered and acknowledged (terminal).
    Completed,
    /// Archived (terminal).
    Archived,
    /// Cancelled (terminal).
    Cancelled,
}

/// Number of lifecycle statuses.
pub const LIFECYCLE_STATUS_COUNT: usize = 12;

impl LifecycleStatus {
    /// All statuses in pipeline order, side branches after the main line.
    pub fn all() -> &'static [LifecycleStatus; LIFECYCLE_STATUS_COUNT] {
        &[
            Self::Draft,
            Self::Submitted,
            Self::MarketplacePosted,
            Self::Claimed,
            Self::Assigned,
            Self::ClarificationPending,
            Self::InReview,
            Self::OpinionReady,
            Self::Delivered,
            Self::Completed,
            Self::Archived,
            Self::Cancelled,
        ]
    }

    /// The snake_case wire name. Matches the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::MarketplacePosted => "marketplace_posted",
            Self::Claimed => "claimed",
            Self::Assigned => "assigned",
            Self::ClarificationPending => "clarification_pending",
            Self::InReview => "in_review",
            Self::OpinionReady => "opinion_ready",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Archived => "archived",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further lifecycle progression occurs from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Archived | Self::Cancelled)
    }

    /// Terminal states that did not end in a delivered opinion.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Archived | Self::Cancelled)
    }

    /// Position in [`LifecycleStatus::all()`]. Used to index fixed tables.
    pub fn index(&self) -> usize {
        match self {
            Self::Draft => 0,
            Self::Submitted => 1,
            Self::MarketplacePosted => 2,
            Self::Claimed => 3,
            Self::Assigned => 4,
            Self::ClarificationPending => 5,
            Self::InReview => 6,
            Self::OpinionReady => 7,
            Self::Delivered => 8,
            Self::Completed => 9,
            Self::Archived => 10,
            Self::Cancelled => 11,
        }
    }
}

impl std::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a raw string does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lifecycle status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for LifecycleStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Title-case a snake_case identifier: `"awaiting_payment"` → `"Awaiting Payment"`.
///
/// Used as the display fallback for status values this build does not know.
pub fn humanize_identifier(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
