//! Next-action advice: the "what happens next" entry a viewer sees for a
//! case. Exhaustive over [`LifecycleStatus`] for each [`ViewerRole`].
//!
//! Advice is keyed on the resolved status. The snapshot is consulted only
//! for facts the status does not carry: whether the client has rated a
//! completed case and whether the case has been formally closed.

use serde::{Deserialize, Serialize};

use crate::snapshot::CaseSnapshot;
use crate::status::LifecycleStatus;

/// Whose screen the advice is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    Client,
    Lawyer,
}

/// Who the next move belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionActor {
    Client,
    Lawyer,
    System,
    None,
}

impl From<ViewerRole> for ActionActor {
    fn from(role: ViewerRole) -> Self {
        match role {
            ViewerRole::Client => Self::Client,
            ViewerRole::Lawyer => Self::Lawyer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvicePriority {
    Low,
    Medium,
    High,
}

/// Case detail tab an action links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseTab {
    Details,
    Documents,
    Clarifications,
    Opinion,
    Rating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionAdvice {
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_tab: Option<CaseTab>,
    pub actor: ActionActor,
    pub priority: AdvicePriority,
}

impl ActionAdvice {
    const fn info(
        title: &'static str,
        description: &'static str,
        actor: ActionActor,
        priority: AdvicePriority,
    ) -> Self {
        Self {
            title,
            description,
            action_label: None,
            action_tab: None,
            actor,
            priority,
        }
    }

    const fn act(
        actor: ActionActor,
        title: &'static str,
        description: &'static str,
        label: &'static str,
        tab: CaseTab,
        priority: AdvicePriority,
    ) -> Self {
        Self {
            title,
            description,
            action_label: Some(label),
            action_tab: Some(tab),
            actor,
            priority,
        }
    }

    /// The viewer has something to do.
    pub fn requires(&self, role: ViewerRole) -> bool {
        self.actor == ActionActor::from(role)
    }
}

/// Advice for `role` on a case resolved to `status`.
pub fn next_action(
    role: ViewerRole,
    snapshot: &CaseSnapshot,
    status: LifecycleStatus,
) -> ActionAdvice {
    match role {
        ViewerRole::Client => client_action(snapshot, status),
        ViewerRole::Lawyer => lawyer_action(snapshot, status),
    }
}

fn client_action(snapshot: &CaseSnapshot, status: LifecycleStatus) -> ActionAdvice {
    use ActionActor as Actor;
    use AdvicePriority as P;
    let client = Actor::Client;

    match status {
        LifecycleStatus::Draft => ActionAdvice::act(
            client,
            "Finish Your Request",
            "Complete and submit the request so a lawyer can be found.",
            "Continue Editing",
            CaseTab::Details,
            P::Medium,
        ),
        LifecycleStatus::Submitted => ActionAdvice::info(
            "Waiting for Assignment",
            "We are finding the best lawyer for your case.",
            Actor::System,
            P::Low,
        ),
        LifecycleStatus::MarketplacePosted => ActionAdvice::info(
            "Posted to Marketplace",
            "Lawyers are reviewing your request.",
            Actor::System,
            P::Low,
        ),
        LifecycleStatus::Claimed | LifecycleStatus::Assigned => ActionAdvice::info(
            "Lawyer Reviewing",
            "Your lawyer is reviewing the case details.",
            Actor::Lawyer,
            P::Medium,
        ),
        LifecycleStatus::ClarificationPending => ActionAdvice::act(
            client,
            "Clarification Needed",
            "Your lawyer needs additional information.",
            "Respond",
            CaseTab::Clarifications,
            P::High,
        ),
        LifecycleStatus::InReview => ActionAdvice::info(
            "Drafting Opinion",
            "Your lawyer is preparing the legal opinion.",
            Actor::Lawyer,
            P::Medium,
        ),
        LifecycleStatus::OpinionReady => ActionAdvice::act(
            client,
            "Opinion Ready",
            "Your legal opinion is ready for review.",
            "View Opinion",
            CaseTab::Opinion,
            P::High,
        ),
        LifecycleStatus::Delivered => ActionAdvice::act(
            client,
            "Opinion Delivered",
            "Open the delivered opinion to confirm you have received it.",
            "View Opinion",
            CaseTab::Opinion,
            P::Medium,
        ),
        LifecycleStatus::Completed if !snapshot.is_rated => ActionAdvice::act(
            client,
            "Rate Your Experience",
            "Help us improve by rating the service.",
            "Rate Lawyer",
            CaseTab::Rating,
            P::Medium,
        ),
        LifecycleStatus::Completed => ActionAdvice::info(
            "Case Completed",
            "This case has been completed and closed.",
            Actor::None,
            P::Low,
        ),
        LifecycleStatus::Archived => ActionAdvice::info(
            "Case Archived",
            "This case has been archived.",
            Actor::None,
            P::Low,
        ),
        LifecycleStatus::Cancelled => ActionAdvice::info(
            "Case Cancelled",
            "This case was cancelled.",
            Actor::None,
            P::Low,
        ),
    }
}

fn lawyer_action(snapshot: &CaseSnapshot, status: LifecycleStatus) -> ActionAdvice {
    use ActionActor as Actor;
    use AdvicePriority as P;
    let lawyer = Actor::Lawyer;

    match status {
        LifecycleStatus::Draft => ActionAdvice::info(
            "Not Yet Submitted",
            "The client has not submitted this request.",
            Actor::Client,
            P::Low,
        ),
        LifecycleStatus::Submitted => ActionAdvice::info(
            "Awaiting Assignment",
            "The request is waiting to be matched with a lawyer.",
            Actor::System,
            P::Low,
        ),
        LifecycleStatus::MarketplacePosted => ActionAdvice::act(
            lawyer,
            "Open Request",
            "The request is posted to the marketplace and can be claimed.",
            "View Request",
            CaseTab::Details,
            P::Medium,
        ),
        LifecycleStatus::Claimed | LifecycleStatus::Assigned => ActionAdvice::act(
            lawyer,
            "Begin Review",
            "Start reviewing case documents and details.",
            "Start Review",
            CaseTab::Documents,
            P::Medium,
        ),
        LifecycleStatus::ClarificationPending => ActionAdvice::act(
            lawyer,
            "Review Clarifications",
            "Clarification threads are open on this case.",
            "Review Responses",
            CaseTab::Clarifications,
            P::High,
        ),
        LifecycleStatus::InReview => ActionAdvice::act(
            lawyer,
            "Submit Opinion",
            "Finish the draft and submit the final opinion.",
            "Draft Opinion",
            CaseTab::Opinion,
            P::High,
        ),
        LifecycleStatus::OpinionReady => ActionAdvice::act(
            lawyer,
            "Sign and Deliver",
            "Sign the final opinion and release it to the client.",
            "Open Opinion",
            CaseTab::Opinion,
            P::High,
        ),
        LifecycleStatus::Delivered => ActionAdvice::info(
            "Awaiting Client",
            "The client has not yet acknowledged the delivered opinion.",
            Actor::Client,
            P::Low,
        ),
        LifecycleStatus::Completed if snapshot.completed_at.is_none() => ActionAdvice::act(
            lawyer,
            "Close Case",
            "The client has acknowledged the opinion. You can now close the case.",
            "Close Case",
            CaseTab::Opinion,
            P::High,
        ),
        LifecycleStatus::Completed => ActionAdvice::info(
            "Case Completed",
            "This case has been completed and closed.",
            Actor::None,
            P::Low,
        ),
        LifecycleStatus::Archived => ActionAdvice::info(
            "Case Archived",
            "This case has been archived.",
            Actor::None,
            P::Low,
        ),
        LifecycleStatus::Cancelled => ActionAdvice::info(
            "Case Cancelled",
            "This case was cancelled.",
            Actor::None,
            P::Low,
        ),
    }
}
