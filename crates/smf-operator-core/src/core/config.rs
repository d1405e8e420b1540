// crates/smf-operator-core/src/core/config.rs
// ============================================================================
// Module: Desired Configuration
// Description: Fully resolved parameters for the SMF configuration file.
// Purpose: Make a partially resolved configuration unrepresentable.
// Dependencies: crate::core::workload, serde
// ============================================================================

//! ## Overview
//! `DesiredConfig` can only be constructed once every upstream value is
//! present; the readiness gate is the sole authority for that check. The
//! renderer therefore never needs to guard against absent fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::Ipv4Addr;

use serde::Serialize;

use crate::core::signals::DatabaseData;
use crate::core::workload::CERTIFICATE_PATH;
use crate::core::workload::DATABASE_NAME;
use crate::core::workload::PRIVATE_KEY_PATH;
use crate::core::workload::SBI_PORT;

// ============================================================================
// SECTION: Desired Configuration
// ============================================================================

/// Resolved input set for rendering the SMF configuration file.
///
/// # Invariants
/// - Every field is required; construction is only possible with all
///   upstream values present.
/// - Field names match the template variables one to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesiredConfig {
    /// First database connection URI.
    pub database_url: String,
    /// Fixed SMF database name.
    pub database_name: String,
    /// Cluster-internal hostname the SBI endpoint registers under.
    pub smf_hostname: String,
    /// Fixed SBI port.
    pub sbi_port: u16,
    /// NRF URL published by the provider.
    pub nrf_url: String,
    /// Webui URL published by the provider.
    pub webui_uri: String,
    /// Pod IP used for the PFCP endpoint.
    pub pod_ip: Ipv4Addr,
    /// SBI scheme, fixed to `https`.
    pub scheme: String,
    /// Path of the TLS private key inside the workload.
    pub tls_key_path: String,
    /// Path of the TLS certificate inside the workload.
    pub tls_cert_path: String,
}

impl DesiredConfig {
    /// Assembles the desired configuration from resolved upstream values.
    #[must_use]
    pub fn assemble(
        database: &DatabaseData,
        nrf_url: &str,
        webui_url: &str,
        pod_ip: Ipv4Addr,
        smf_hostname: &str,
    ) -> Self {
        Self {
            database_url: database.first_uri().to_string(),
            database_name: DATABASE_NAME.to_string(),
            smf_hostname: smf_hostname.to_string(),
            sbi_port: SBI_PORT,
            nrf_url: nrf_url.to_string(),
            webui_uri: webui_url.to_string(),
            pod_ip,
            scheme: "https".to_string(),
            tls_key_path: PRIVATE_KEY_PATH.to_string(),
            tls_cert_path: CERTIFICATE_PATH.to_string(),
        }
    }
}
