//! # Identifier Newtypes
//!
//! Case identifiers are UUIDs in storage; the newtype keeps them from being
//! confused with any other UUID at call sites.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LexcaseError;

/// Identifier of a legal request (case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub Uuid);

impl CaseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse from the hyphenated string form used by the request table.
    pub fn parse(s: &str) -> Result<Self, LexcaseError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| LexcaseError::InvalidIdentifier(format!("case id {s:?}: {e}")))
    }
}

impl Default for CaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
