// crates/smf-operator-core/src/core/status.rs
// ============================================================================
// Module: Unit Status
// Description: Externally observable status of the operator unit.
// Purpose: Report readiness as a value, decoupled from reconciliation side effects.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! `Status` is the only user-facing signal the operator produces. It is
//! recomputed from the signal snapshot on every status-collection trigger;
//! the reason string of the first failing readiness check is a contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Unit status with a human-readable reason for non-active states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// A precondition requires operator intervention.
    Blocked(String),
    /// A precondition is expected to resolve on a later trigger.
    Waiting(String),
    /// The workload is configured and running.
    Active,
}

impl Status {
    /// Returns the reason string, empty for [`Status::Active`].
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Blocked(reason) | Self::Waiting(reason) => reason,
            Self::Active => "",
        }
    }
}
