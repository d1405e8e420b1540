// crates/smf-operator-relations/src/database.rs
// ============================================================================
// Module: Database Databag Adapter
// Description: Validation of the database provider databag.
// Purpose: Extract complete connection data or report absence.
// Dependencies: crate::Databag, smf-operator-core
// ============================================================================

//! Database provider databag validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use smf_operator_core::DatabaseData;

use crate::Databag;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Extracts database connection data from the provider databag.
///
/// Returns `None` until `uris`, `username`, and `password` are all present
/// and non-empty. The provider publishes these fields only after the
/// database resource has been created.
#[must_use]
pub fn database_data(databag: &Databag) -> Option<DatabaseData> {
    let uris = databag.get("uris").filter(|value| !value.is_empty())?;
    let username = databag.get("username").filter(|value| !value.is_empty())?;
    let password = databag.get("password").filter(|value| !value.is_empty())?;
    Some(DatabaseData {
        uris: uris.clone(),
        username: username.clone(),
        password: password.clone(),
    })
}
