// crates/smf-operator-relations/src/certificates.rs
// ============================================================================
// Module: Certificate Relation Adapter
// Description: Provider databag parsing and the relation-backed certificate source.
// Purpose: Surface issued certificates to the engine and record outgoing CSRs.
// Dependencies: crate::Databag, smf-operator-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The certificate provider publishes issued certificates as a JSON array
//! under the `certificates` databag field. Each entry pairs a certificate
//! with the CSR it answers, so a requirer can match deliveries against its
//! own outstanding request and drop anything stale.
//! Invariants:
//! - Matching is by CSR bytes after trimming surrounding whitespace.
//! - A malformed databag yields no entries, never an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;

use smf_operator_core::CertificateBundle;
use smf_operator_core::CertificateRequest;
use smf_operator_core::CertificateSource;
use smf_operator_core::CertificateSourceError;

use crate::Databag;

// ============================================================================
// SECTION: Provider Schema
// ============================================================================

/// One issued certificate as published by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderCertificateEntry {
    /// PEM-encoded issued certificate.
    pub certificate: String,
    /// PEM-encoded CSR this certificate answers.
    pub certificate_signing_request: String,
    /// PEM-encoded issuing CA certificate.
    #[serde(default)]
    pub ca: String,
    /// PEM-encoded chain from the certificate up to the root.
    #[serde(default)]
    pub chain: Vec<String>,
}

/// Parses the issued certificates out of the provider databag.
///
/// Returns an empty list when the `certificates` field is absent or does
/// not parse as the expected JSON array.
#[must_use]
pub fn provider_certificates(databag: &Databag) -> Vec<ProviderCertificateEntry> {
    databag
        .get("certificates")
        .and_then(|raw| serde_json::from_str::<Vec<ProviderCertificateEntry>>(raw).ok())
        .unwrap_or_default()
}

// ============================================================================
// SECTION: Relation Source
// ============================================================================

/// Certificate source backed by the certificates relation.
///
/// Holds the provider entries parsed from the databag together with the
/// locally persisted private key and CSR, and records CSRs submitted
/// through it so the caller can publish them into the relation.
#[derive(Debug, Clone)]
pub struct RelationCertificateSource {
    /// Certificates currently published by the provider.
    entries: Vec<ProviderCertificateEntry>,
    /// Locally persisted private key, when one has been generated.
    private_key_pem: Option<String>,
    /// Locally persisted CSR, when one has been generated.
    csr_pem: Option<String>,
    /// CSRs submitted during this dispatch, in submission order.
    submitted: Vec<String>,
}

impl RelationCertificateSource {
    /// Builds a source over the provider entries and local TLS state.
    #[must_use]
    pub const fn new(
        entries: Vec<ProviderCertificateEntry>,
        private_key_pem: Option<String>,
        csr_pem: Option<String>,
    ) -> Self {
        Self {
            entries,
            private_key_pem,
            csr_pem,
            submitted: Vec::new(),
        }
    }

    /// CSRs submitted through this source during the current dispatch.
    #[must_use]
    pub fn submitted_requests(&self) -> &[String] {
        &self.submitted
    }
}

impl CertificateSource for RelationCertificateSource {
    fn assigned_certificate(&self, _request: &CertificateRequest) -> Option<CertificateBundle> {
        let key = self.private_key_pem.as_ref()?;
        let csr = self.csr_pem.as_ref()?;
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.certificate_signing_request.trim() == csr.trim())?;
        Some(CertificateBundle {
            certificate_pem: entry.certificate.clone(),
            private_key_pem: key.clone(),
        })
    }

    fn request_certificate(&mut self, csr_pem: &str) -> Result<(), CertificateSourceError> {
        self.submitted.push(csr_pem.to_string());
        Ok(())
    }
}
