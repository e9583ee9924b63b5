//! # lexcase-core: Foundational Types
//!
//! Primitives shared by every crate in the workspace. Nothing here knows
//! about lifecycle rules; it only guarantees that the values the engine
//! consumes are well-formed and hashable in a stable way.
//!
//! ## Key Design Principles
//!
//! 1. **UTC-only timestamps.** [`Timestamp`] is always UTC with seconds
//!    precision, so two snapshots describing the same instant serialize to
//!    the same bytes.
//!
//! 2. **`CanonicalBytes` newtype.** Cache keys are computed over
//!    [`CanonicalBytes`] only, which are produced by JCS (RFC 8785)
//!    serialization. Field order in a struct never changes a digest.
//!
//! 3. **Identifier newtypes.** A [`CaseId`] cannot be passed where some
//!    other UUID is expected.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lexcase-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, LexcaseError};
pub use identity::CaseId;
pub use temporal::Timestamp;
