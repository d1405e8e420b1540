// crates/smf-operator-core/src/core/signals.rs
// ============================================================================
// Module: External Signal Snapshot
// Description: Value types for the external signals observed per dispatch.
// Purpose: Represent the complete input state of one reconciliation cycle.
// Dependencies: crate::core::workload, serde
// ============================================================================

//! ## Overview
//! Every dispatch recomputes the full set of external signals from scratch;
//! nothing here survives across invocations. Missing or schema-invalid
//! upstream data is represented as `None`, never as an error.
//! Invariants:
//! - A snapshot is immutable once assembled.
//! - Absence is an expected state for every optional signal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::workload::CERTIFICATE_COMMON_NAME;

// ============================================================================
// SECTION: Relations
// ============================================================================

/// Integration points the operator depends on, in readiness-check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    /// MongoDB database provider.
    Database,
    /// NRF URL provider.
    FivegNrf,
    /// TLS certificate authority.
    Certificates,
    /// Webui configuration provider.
    SdcoreConfig,
}

impl Relation {
    /// All relations the operator requires, in readiness-check order.
    pub const ALL: [Self; 4] = [Self::Database, Self::FivegNrf, Self::Certificates, Self::SdcoreConfig];

    /// Canonical endpoint name of the relation.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::FivegNrf => "fiveg_nrf",
            Self::Certificates => "certificates",
            Self::SdcoreConfig => "sdcore_config",
        }
    }
}

// ============================================================================
// SECTION: Signal Payloads
// ============================================================================

/// Connection data published by the database provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseData {
    /// Comma-joined connection URIs.
    pub uris: String,
    /// Database account username.
    pub username: String,
    /// Database account password.
    pub password: String,
}

impl DatabaseData {
    /// Returns the first connection URI. The operator consumes only this one.
    #[must_use]
    pub fn first_uri(&self) -> &str {
        self.uris.split(',').next().unwrap_or_default()
    }
}

/// Certificate and private key fetched as a transactional pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateBundle {
    /// PEM-encoded certificate.
    pub certificate_pem: String,
    /// PEM-encoded private key.
    pub private_key_pem: String,
}

/// Deterministic certificate request derived from fixed constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRequest {
    /// Subject common name.
    pub common_name: String,
    /// DNS subject alternative names.
    pub sans_dns: Vec<String>,
}

impl CertificateRequest {
    /// Builds the fixed request for the SMF workload certificate.
    #[must_use]
    pub fn smf() -> Self {
        Self {
            common_name: CERTIFICATE_COMMON_NAME.to_string(),
            sans_dns: vec![CERTIFICATE_COMMON_NAME.to_string()],
        }
    }
}

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Complete external state observed by one dispatch.
///
/// # Invariants
/// - Assembled fresh per trigger; never cached across invocations.
/// - `relations` holds the endpoints that exist, regardless of data content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSnapshot {
    /// Whether this unit is the elected leader.
    pub leader: bool,
    /// Relations that currently exist.
    pub relations: BTreeSet<Relation>,
    /// Whether the workload container accepts operations.
    pub container_ready: bool,
    /// Database connection data, when the resource has been created.
    pub database: Option<DatabaseData>,
    /// NRF URL, when published and schema-valid.
    pub nrf_url: Option<String>,
    /// Webui URL, when published and schema-valid.
    pub webui_url: Option<String>,
    /// Whether the configuration storage mount is attached.
    pub storage_attached: bool,
    /// Pod IP address, when resolvable.
    pub pod_ip: Option<Ipv4Addr>,
    /// Assigned certificate and key pair, when issued.
    pub certificate: Option<CertificateBundle>,
    /// Whether the supervised SMF service reports running.
    pub service_running: bool,
}

impl SignalSnapshot {
    /// Returns the required relations that do not currently exist,
    /// in readiness-check order.
    #[must_use]
    pub fn missing_relations(&self) -> Vec<Relation> {
        Relation::ALL.into_iter().filter(|relation| !self.relations.contains(relation)).collect()
    }
}
