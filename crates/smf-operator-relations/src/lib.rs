// crates/smf-operator-relations/src/lib.rs
// ============================================================================
// Module: Relation Data Adapters
// Description: Schema validation for relation databags and TLS primitives.
// Purpose: Convert raw relation data into the typed signals the engine consumes.
// Dependencies: smf-operator-core, rcgen, serde_json, url
// ============================================================================

//! ## Overview
//! Adapters in this crate sit between raw Juju relation databags and the
//! typed signal snapshot. Every adapter is fail-closed: missing fields,
//! malformed JSON, or schema-invalid values yield `None` rather than an
//! error, because upstream data routinely arrives incomplete while a
//! relation settles.
//! Invariants:
//! - Adapters never mutate relation data.
//! - Absence and invalidity are indistinguishable to callers.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// TLS certificate provider databag parsing and the relation-backed source.
pub mod certificates;
/// Private key and CSR generation backed by `rcgen`.
pub mod csr;
/// Database provider databag validation.
pub mod database;
/// NRF provider databag validation.
pub mod nrf;
/// Webui provider databag validation.
pub mod webui;

// ============================================================================
// SECTION: Databag
// ============================================================================

use std::collections::BTreeMap;

/// Raw relation databag as fetched from Juju: flat string keys and values.
pub type Databag = BTreeMap<String, String>;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use certificates::ProviderCertificateEntry;
pub use certificates::RelationCertificateSource;
pub use certificates::provider_certificates;
pub use csr::RcgenCsrFactory;
pub use database::database_data;
pub use nrf::nrf_url;
pub use webui::webui_url;
