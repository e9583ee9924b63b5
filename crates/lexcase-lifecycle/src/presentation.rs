//! # Status Presentation Table
//!
//! One shared, versioned mapping from [`LifecycleStatus`] to the label,
//! description and terminality every surface renders. Consumers receive a
//! table by reference instead of carrying their own copies of the strings.
//!
//! A table is total by construction: [`PresentationTable::get`] cannot miss.
//! Loading a table that leaves a status out, or that disagrees with
//! [`LifecycleStatus::is_terminal`], fails with [`PresentationError`].
//!
//! Raw strings that do not name a known status (a status added upstream
//! before this build learned it) render through
//! [`PresentationTable::label_for_raw`], which falls back to a title-cased
//! form of the raw value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::status::{humanize_identifier, LifecycleStatus, LIFECYCLE_STATUS_COUNT};

/// Display data for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusPresentation {
    pub label: String,
    pub description: String,
    pub is_terminal: bool,
}

impl StatusPresentation {
    fn new(label: &str, description: &str, is_terminal: bool) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
            is_terminal,
        }
    }
}

/// Errors from building or loading a presentation table.
#[derive(Debug, thiserror::Error)]
pub enum PresentationError {
    #[error("presentation table has no entry for status {0}")]
    MissingStatus(LifecycleStatus),

    #[error("presentation entry for {status} has is_terminal = {declared}, expected {expected}")]
    TerminalMismatch {
        status: LifecycleStatus,
        declared: bool,
        expected: bool,
    },

    #[error("presentation entry for {0} has an empty label")]
    EmptyLabel(LifecycleStatus),

    #[error("failed to parse presentation table: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Wire form: a version plus a map keyed by status name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    version: u32,
    statuses: BTreeMap<LifecycleStatus, StatusPresentation>,
}

/// Versioned, total status presentation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct PresentationTable {
    version: u32,
    /// Indexed by [`LifecycleStatus::index`].
    entries: Vec<StatusPresentation>,
}

impl PresentationTable {
    /// The built-in table.
    pub fn standard() -> Self {
        let entries = LifecycleStatus::all()
            .iter()
            .map(|status| standard_entry(*status))
            .collect();
        Self {
            version: 1,
            entries,
        }
    }

    /// Build a table from explicit entries, checking totality and
    /// terminality.
    pub fn from_entries(
        version: u32,
        mut statuses: BTreeMap<LifecycleStatus, StatusPresentation>,
    ) -> Result<Self, PresentationError> {
        let mut entries = Vec::with_capacity(LIFECYCLE_STATUS_COUNT);
        for status in LifecycleStatus::all() {
            let entry = statuses
                .remove(status)
                .ok_or(PresentationError::MissingStatus(*status))?;
            if entry.label.trim().is_empty() {
                return Err(PresentationError::EmptyLabel(*status));
            }
            if entry.is_terminal != status.is_terminal() {
                return Err(PresentationError::TerminalMismatch {
                    status: *status,
                    declared: entry.is_terminal,
                    expected: status.is_terminal(),
                });
            }
            entries.push(entry);
        }
        Ok(Self { version, entries })
    }

    /// Parse a table from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PresentationError> {
        let raw: RawTable = serde_yaml::from_str(yaml)?;
        Self::try_from(raw)
    }

    pub fn to_yaml_string(&self) -> Result<String, PresentationError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, status: LifecycleStatus) -> &StatusPresentation {
        &self.entries[status.index()]
    }

    pub fn label(&self, status: LifecycleStatus) -> &str {
        &self.get(status).label
    }

    /// Iterate entries in [`LifecycleStatus::all`] order.
    pub fn iter(&self) -> impl Iterator<Item = (LifecycleStatus, &StatusPresentation)> {
        LifecycleStatus::all().iter().copied().zip(self.entries.iter())
    }

    /// Label for a raw status string.
    ///
    /// Known statuses use the table. Anything else renders as the title-cased
    /// raw value, so an unknown status never breaks a dashboard.
    pub fn label_for_raw(&self, raw: &str) -> String {
        match raw.parse::<LifecycleStatus>() {
            Ok(status) => self.label(status).to_string(),
            Err(_) => {
                let fallback = humanize_identifier(raw);
                tracing::warn!(raw, %fallback, "no presentation entry, using fallback label");
                if fallback.is_empty() {
                    "Unknown".to_string()
                } else {
                    fallback
                }
            }
        }
    }
}

impl Default for PresentationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<RawTable> for PresentationTable {
    type Error = PresentationError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Self::from_entries(raw.version, raw.statuses)
    }
}

impl From<PresentationTable> for RawTable {
    fn from(table: PresentationTable) -> Self {
        let statuses = LifecycleStatus::all()
            .iter()
            .copied()
            .zip(table.entries)
            .collect();
        Self {
            version: table.version,
            statuses,
        }
    }
}

fn standard_entry(status: LifecycleStatus) -> StatusPresentation {
    let terminal = status.is_terminal();
    match status {
        LifecycleStatus::Draft => StatusPresentation::new(
            "Draft",
            "The request is being prepared and has not been submitted.",
            terminal,
        ),
        LifecycleStatus::Submitted => StatusPresentation::new(
            "Submitted",
            "The request was submitted and is waiting for a lawyer.",
            terminal,
        ),
        LifecycleStatus::MarketplacePosted => StatusPresentation::new(
            "Posted",
            "The request is open on the marketplace for lawyers to claim.",
            terminal,
        ),
        LifecycleStatus::Claimed => StatusPresentation::new(
            "Claimed",
            "A marketplace lawyer has claimed the request.",
            terminal,
        ),
        LifecycleStatus::Assigned => StatusPresentation::new(
            "Assigned",
            "A lawyer is assigned and reviewing the case details.",
            terminal,
        ),
        LifecycleStatus::ClarificationPending => StatusPresentation::new(
            "Clarification Needed",
            "The lawyer is waiting on additional information from the client.",
            terminal,
        ),
        LifecycleStatus::InReview => StatusPresentation::new(
            "In Review",
            "The lawyer is drafting the legal opinion.",
            terminal,
        ),
        LifecycleStatus::OpinionReady => StatusPresentation::new(
            "Opinion Ready",
            "A final opinion has been submitted and awaits signature and delivery.",
            terminal,
        ),
        LifecycleStatus::Delivered => StatusPresentation::new(
            "Delivered",
            "The signed opinion has been delivered to the client.",
            terminal,
        ),
        LifecycleStatus::Completed => StatusPresentation::new(
            "Completed",
            "The client acknowledged the delivered opinion.",
            terminal,
        ),
        LifecycleStatus::Archived => StatusPresentation::new(
            "Archived",
            "The case was archived.",
            terminal,
        ),
        LifecycleStatus::Cancelled => StatusPresentation::new(
            "Cancelled",
            "The case was cancelled before completion.",
            terminal,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_total() {
        let table = PresentationTable::standard();
        assert_eq!(table.iter().count(), LIFECYCLE_STATUS_COUNT);
        for status in LifecycleStatus::all() {
            let entry = table.get(*status);
            assert!(!entry.label.is_empty(), "{status}");
            assert!(!entry.description.is_empty(), "{status}");
            assert_eq!(entry.is_terminal, status.is_terminal(), "{status}");
        }
    }

    #[test]
    fn test_standard_labels_are_distinct() {
        let table = PresentationTable::standard();
        let labels: std::collections::HashSet<_> =
            table.iter().map(|(_, e)| e.label.as_str()).collect();
        assert_eq!(labels.len(), LIFECYCLE_STATUS_COUNT);
    }

    #[test]
    fn test_known_labels() {
        let table = PresentationTable::standard();
        assert_eq!(table.label(LifecycleStatus::MarketplacePosted), "Posted");
        assert_eq!(
            table.label(LifecycleStatus::ClarificationPending),
            "Clarification Needed"
        );
        assert_eq!(table.label(LifecycleStatus::InReview), "In Review");
    }

    #[test]
    fn test_label_for_raw_known_and_unknown() {
        let table = PresentationTable::standard();
        assert_eq!(table.label_for_raw("opinion_ready"), "Opinion Ready");
        assert_eq!(table.label_for_raw("awaiting_payment"), "Awaiting Payment");
        assert_eq!(table.label_for_raw(""), "Unknown");
    }

    #[test]
    fn test_yaml_roundtrip_preserves_table() {
        let table = PresentationTable::standard();
        let yaml = table.to_yaml_string().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("clarification_pending"));
        let parsed = PresentationTable::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_missing_status_rejected() {
        let table = PresentationTable::standard();
        let mut statuses: BTreeMap<_, _> = table.iter().map(|(s, e)| (s, e.clone())).collect();
        statuses.remove(&LifecycleStatus::Claimed);
        let err = PresentationTable::from_entries(2, statuses).unwrap_err();
        assert!(matches!(
            err,
            PresentationError::MissingStatus(LifecycleStatus::Claimed)
        ));
    }

    #[test]
    fn test_terminal_mismatch_rejected() {
        let table = PresentationTable::standard();
        let mut statuses: BTreeMap<_, _> = table.iter().map(|(s, e)| (s, e.clone())).collect();
        if let Some(entry) = statuses.get_mut(&LifecycleStatus::Delivered) {
            entry.is_terminal = true;
        }
        let err = PresentationTable::from_entries(2, statuses).unwrap_err();
        assert!(matches!(
            err,
            PresentationError::TerminalMismatch {
                status: LifecycleStatus::Delivered,
                declared: true,
                expected: false,
            }
        ));
    }

    #[test]
    fn test_empty_label_rejected() {
        let table = PresentationTable::standard();
        let mut statuses: BTreeMap<_, _> = table.iter().map(|(s, e)| (s, e.clone())).collect();
        if let Some(entry) = statuses.get_mut(&LifecycleStatus::Draft) {
            entry.label = "  ".to_string();
        }
        assert!(matches!(
            PresentationTable::from_entries(1, statuses),
            Err(PresentationError::EmptyLabel(LifecycleStatus::Draft))
        ));
    }

    #[test]
    fn test_yaml_with_unknown_status_key_fails() {
        let yaml = "version: 1\nstatuses:\n  awaiting_payment:\n    label: X\n    description: Y\n    is_terminal: false\n";
        assert!(matches!(
            PresentationTable::from_yaml_str(yaml),
            Err(PresentationError::Parse(_))
        ));
    }

    #[test]
    fn test_yaml_with_misspelled_field_fails() {
        let yaml = PresentationTable::standard()
            .to_yaml_string()
            .unwrap()
            .replacen("is_terminal", "terminal", 1);
        assert!(matches!(
            PresentationTable::from_yaml_str(&yaml),
            Err(PresentationError::Parse(_))
        ));

        let yaml = PresentationTable::standard().to_yaml_string().unwrap() + "revision: 2\n";
        assert!(matches!(
            PresentationTable::from_yaml_str(&yaml),
            Err(PresentationError::Parse(_))
        ));
    }

    #[test]
    fn test_partial_yaml_fails_totality() {
        let yaml = "version: 3\nstatuses:\n  draft:\n    label: Draft\n    description: d\n    is_terminal: false\n";
        assert!(matches!(
            PresentationTable::from_yaml_str(yaml),
            Err(PresentationError::MissingStatus(LifecycleStatus::Submitted))
        ));
    }
}
