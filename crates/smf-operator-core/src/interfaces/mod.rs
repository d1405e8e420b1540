// crates/smf-operator-core/src/interfaces/mod.rs
// ============================================================================
// Module: Operator Interfaces
// Description: Backend-agnostic interfaces for storage, supervision, and certificates.
// Purpose: Define the contract surfaces the reconciler drives.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the reconciler integrates with the workload
//! container and the certificate authority without embedding backend
//! details. Implementations must be deterministic within one dispatch and
//! treat "not yet available" as an ordinary value, never an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::CertificateBundle;
use crate::core::CertificateRequest;
use crate::core::ServicePlan;

// ============================================================================
// SECTION: Blob Store
// ============================================================================

/// Blob store errors.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    /// The storage backend reported an error.
    #[error("blob store error: {0}")]
    Backend(String),
}

/// Byte storage keyed by absolute path inside the workload filesystem.
pub trait BlobStore {
    /// Returns whether a blob exists at the path.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the backend cannot be queried.
    fn exists(&self, path: &str) -> Result<bool, BlobStoreError>;

    /// Reads the blob at the path; `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the backend cannot be read.
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, BlobStoreError>;

    /// Writes the blob at the path, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the write fails.
    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), BlobStoreError>;

    /// Deletes the blob at the path. Deleting an absent blob is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the delete fails for a present blob.
    fn delete(&mut self, path: &str) -> Result<(), BlobStoreError>;
}

// ============================================================================
// SECTION: Process Supervisor
// ============================================================================

/// Process supervisor errors.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The supervisor backend reported an error.
    #[error("supervisor error: {0}")]
    Backend(String),
}

/// Declarative process supervisor for the workload container.
pub trait ProcessSupervisor {
    /// Returns the currently applied plan.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError`] when the plan cannot be fetched.
    fn plan(&self) -> Result<ServicePlan, SupervisorError>;

    /// Applies a plan, layering it over the current one.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError`] when the plan cannot be applied.
    fn apply_plan(&mut self, plan: &ServicePlan) -> Result<(), SupervisorError>;

    /// Restarts (or starts) the named service.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError`] when the restart fails.
    fn restart(&mut self, service: &str) -> Result<(), SupervisorError>;

    /// Returns whether the named service reports running.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError`] when the state cannot be queried.
    fn is_running(&self, service: &str) -> Result<bool, SupervisorError>;
}

// ============================================================================
// SECTION: Certificate Source
// ============================================================================

/// Certificate source errors.
#[derive(Debug, Error)]
pub enum CertificateSourceError {
    /// The certificate backend reported an error.
    #[error("certificate source error: {0}")]
    Backend(String),
}

/// Authority-facing certificate access.
///
/// The primary contract is the synchronous pair model: poll for an assigned
/// certificate and key matching the fixed request. The legacy CSR flow uses
/// [`CertificateSource::request_certificate`] and delivers certificates
/// asynchronously through relation events.
pub trait CertificateSource {
    /// Returns the assigned certificate and key pair matching the request,
    /// `None` while no pair has been issued.
    fn assigned_certificate(&self, request: &CertificateRequest) -> Option<CertificateBundle>;

    /// Submits a CSR for signing. Legacy flow only.
    ///
    /// # Errors
    ///
    /// Returns [`CertificateSourceError`] when the request cannot be recorded.
    fn request_certificate(&mut self, csr_pem: &str) -> Result<(), CertificateSourceError>;
}

// ============================================================================
// SECTION: CSR Factory
// ============================================================================

/// Key and CSR generation errors.
#[derive(Debug, Error)]
pub enum CsrError {
    /// Key or CSR generation failed.
    #[error("csr generation error: {0}")]
    Generation(String),
}

/// Private key and CSR generation for the legacy certificate flow.
pub trait CsrFactory {
    /// Generates a new PEM private key.
    ///
    /// # Errors
    ///
    /// Returns [`CsrError`] when key generation fails.
    fn generate_private_key(&self) -> Result<String, CsrError>;

    /// Generates a PEM CSR bound to the request, signed with the key.
    ///
    /// # Errors
    ///
    /// Returns [`CsrError`] when CSR generation fails.
    fn generate_csr(&self, private_key_pem: &str, request: &CertificateRequest) -> Result<String, CsrError>;
}
