// crates/smf-operator-core/src/runtime/certificates.rs
// ============================================================================
// Module: Certificate Manager
// Description: Convergence of TLS material between authority and blob store.
// Purpose: Store issued certificates and keys, rewriting only on byte change.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The primary contract is the synchronous pair model: each cycle polls for
//! the assigned certificate and key matching the fixed request and converges
//! the stored copies. The legacy CSR flow is retained for the asynchronous
//! model, including both anti-staleness guards (CSR byte match on delivery,
//! certificate byte match on expiry).
//! Invariants:
//! - Exactly one outstanding request shape exists per cycle.
//! - Content equality, not existence, decides every write.
//! - Cleanup is idempotent; deleting absent material is a no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::CertificateRequest;
use crate::core::workload::CERTIFICATE_PATH;
use crate::core::workload::CSR_PATH;
use crate::core::workload::PRIVATE_KEY_PATH;
use crate::interfaces::BlobStore;
use crate::interfaces::BlobStoreError;
use crate::interfaces::CertificateSource;
use crate::interfaces::CertificateSourceError;
use crate::interfaces::CsrError;
use crate::interfaces::CsrFactory;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Result of one certificate convergence pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateOutcome {
    /// Whether an issued pair matching the request exists.
    pub available: bool,
    /// Whether certificate or key bytes were (re)written this pass.
    pub updated: bool,
}

// ============================================================================
// SECTION: Pair-Model Manager
// ============================================================================

/// Ensures the stored certificate and key match the assigned pair.
///
/// Returns `{available: false, updated: false}` while no pair has been
/// issued; the caller treats that as a waiting state, not an error.
///
/// # Errors
///
/// Returns [`BlobStoreError`] when stored material cannot be read or written.
pub fn ensure_certificate<C, B>(source: &C, store: &mut B) -> Result<CertificateOutcome, BlobStoreError>
where
    C: CertificateSource,
    B: BlobStore,
{
    let request = CertificateRequest::smf();
    let Some(bundle) = source.assigned_certificate(&request) else {
        return Ok(CertificateOutcome {
            available: false,
            updated: false,
        });
    };

    let mut updated = false;
    if stored_differs(store, CERTIFICATE_PATH, bundle.certificate_pem.as_bytes())? {
        store.write(CERTIFICATE_PATH, bundle.certificate_pem.as_bytes())?;
        updated = true;
    }
    if stored_differs(store, PRIVATE_KEY_PATH, bundle.private_key_pem.as_bytes())? {
        store.write(PRIVATE_KEY_PATH, bundle.private_key_pem.as_bytes())?;
        updated = true;
    }

    Ok(CertificateOutcome {
        available: true,
        updated,
    })
}

/// Deletes stored certificate and key. Idempotent.
///
/// # Errors
///
/// Returns [`BlobStoreError`] when a present blob cannot be deleted.
pub fn cleanup_certificate<B: BlobStore>(store: &mut B) -> Result<(), BlobStoreError> {
    store.delete(PRIVATE_KEY_PATH)?;
    store.delete(CERTIFICATE_PATH)?;
    Ok(())
}

/// Returns whether the stored blob differs from the desired bytes.
/// Absence counts as different.
fn stored_differs<B: BlobStore>(store: &B, path: &str, desired: &[u8]) -> Result<bool, BlobStoreError> {
    Ok(store.read(path)?.as_deref() != Some(desired))
}

// ============================================================================
// SECTION: Legacy CSR Flow
// ============================================================================

/// Legacy certificate flow errors.
#[derive(Debug, Error)]
pub enum LegacyFlowError {
    /// Stored material could not be read or written.
    #[error(transparent)]
    Store(#[from] BlobStoreError),
    /// The certificate authority rejected the request.
    #[error(transparent)]
    Source(#[from] CertificateSourceError),
    /// Key or CSR generation failed.
    #[error(transparent)]
    Csr(#[from] CsrError),
    /// A CSR was requested before the private key was stored.
    #[error("private key is not stored")]
    MissingPrivateKey,
}

/// Asynchronous CSR-based certificate flow.
///
/// Retained for authorities that deliver certificates through
/// relation events rather than as an assigned pair.
#[derive(Debug, Clone)]
pub struct LegacyCsrFlow<F> {
    /// Key and CSR generation backend.
    factory: F,
}

impl<F: CsrFactory> LegacyCsrFlow<F> {
    /// Creates a legacy flow over the given CSR factory.
    pub const fn new(factory: F) -> Self {
        Self {
            factory,
        }
    }

    /// Generates and stores a private key when none is stored yet.
    /// Returns whether a key was written.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyFlowError`] when generation or storage fails.
    pub fn ensure_private_key<B: BlobStore>(&self, store: &mut B) -> Result<bool, LegacyFlowError> {
        if store.exists(PRIVATE_KEY_PATH)? {
            return Ok(false);
        }
        let private_key = self.factory.generate_private_key()?;
        store.write(PRIVATE_KEY_PATH, private_key.as_bytes())?;
        Ok(true)
    }

    /// Generates, stores, and submits a CSR when none is stored yet.
    /// Returns whether a new request was submitted.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyFlowError::MissingPrivateKey`] when called before
    /// [`LegacyCsrFlow::ensure_private_key`] stored a key.
    pub fn ensure_csr<B, C>(&self, store: &mut B, source: &mut C) -> Result<bool, LegacyFlowError>
    where
        B: BlobStore,
        C: CertificateSource,
    {
        if store.exists(CSR_PATH)? {
            return Ok(false);
        }
        let private_key = store.read(PRIVATE_KEY_PATH)?.ok_or(LegacyFlowError::MissingPrivateKey)?;
        let private_key_pem = String::from_utf8_lossy(&private_key).into_owned();
        let csr = self.factory.generate_csr(&private_key_pem, &CertificateRequest::smf())?;
        store.write(CSR_PATH, csr.trim().as_bytes())?;
        source.request_certificate(&csr)?;
        Ok(true)
    }

    /// Accepts a delivered certificate only when its CSR byte-matches the
    /// stored one; stale or out-of-order deliveries are dropped. Returns
    /// whether certificate bytes were (re)written.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyFlowError`] when stored material cannot be accessed.
    pub fn accept_certificate<B: BlobStore>(
        &self,
        store: &mut B,
        event_csr: &str,
        event_certificate: &str,
    ) -> Result<bool, LegacyFlowError> {
        let stored_csr = store.read(CSR_PATH)?;
        if stored_csr.as_deref() != Some(event_csr.trim().as_bytes()) {
            return Ok(false);
        }
        if !stored_differs(store, CERTIFICATE_PATH, event_certificate.as_bytes())? {
            return Ok(false);
        }
        store.write(CERTIFICATE_PATH, event_certificate.as_bytes())?;
        Ok(true)
    }

    /// Re-requests a certificate on expiry only when the expiring
    /// certificate byte-matches the stored one. Returns whether a new
    /// request was submitted.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyFlowError`] when stored material cannot be accessed
    /// or the new request fails.
    pub fn handle_expiring<B, C>(
        &self,
        store: &mut B,
        source: &mut C,
        expiring_certificate: &str,
    ) -> Result<bool, LegacyFlowError>
    where
        B: BlobStore,
        C: CertificateSource,
    {
        let stored = store.read(CERTIFICATE_PATH)?;
        if stored.as_deref() != Some(expiring_certificate.as_bytes()) {
            return Ok(false);
        }
        let private_key = store.read(PRIVATE_KEY_PATH)?.ok_or(LegacyFlowError::MissingPrivateKey)?;
        let private_key_pem = String::from_utf8_lossy(&private_key).into_owned();
        let csr = self.factory.generate_csr(&private_key_pem, &CertificateRequest::smf())?;
        store.write(CSR_PATH, csr.trim().as_bytes())?;
        source.request_certificate(&csr)?;
        Ok(true)
    }

    /// Deletes stored key, CSR, and certificate. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyFlowError`] when a present blob cannot be deleted.
    pub fn cleanup<B: BlobStore>(&self, store: &mut B) -> Result<(), LegacyFlowError> {
        store.delete(PRIVATE_KEY_PATH)?;
        store.delete(CSR_PATH)?;
        store.delete(CERTIFICATE_PATH)?;
        Ok(())
    }
}
