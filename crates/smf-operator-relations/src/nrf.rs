// crates/smf-operator-relations/src/nrf.rs
// ============================================================================
// Module: NRF Databag Adapter
// Description: Validation of the fiveg_nrf provider databag.
// Purpose: Extract a well-formed NRF URL or report absence.
// Dependencies: crate::Databag, url
// ============================================================================

//! NRF provider databag validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use url::Url;

use crate::Databag;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Extracts the NRF URL from the provider databag.
///
/// Returns `None` when the `url` field is absent, not parseable as a URL,
/// or uses a scheme other than HTTP or HTTPS.
#[must_use]
pub fn nrf_url(databag: &Databag) -> Option<String> {
    let raw = databag.get("url")?;
    let parsed = Url::parse(raw).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    Some(raw.clone())
}
