// crates/smf-operator-relations/src/webui.rs
// ============================================================================
// Module: Webui Databag Adapter
// Description: Validation of the sdcore_config provider databag.
// Purpose: Extract the Webui GRPC address or report absence.
// Dependencies: crate::Databag
// ============================================================================

//! Webui provider databag validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::Databag;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Extracts the Webui GRPC address from the provider databag.
///
/// The address is a bare `host:port` pair, not a URL. Returns `None` when
/// the `webui_url` field is absent or empty.
#[must_use]
pub fn webui_url(databag: &Databag) -> Option<String> {
    databag.get("webui_url").filter(|value| !value.is_empty()).cloned()
}
