// crates/smf-operator-core/src/lib.rs
// ============================================================================
// Module: SMF Operator Core Library
// Description: Public API surface for the SMF operator core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The SMF operator core provides deterministic reconciliation of a 5G SMF
//! workload: readiness evaluation, certificate convergence, configuration
//! rendering, and diff-based plan application. It is backend-agnostic and
//! integrates through explicit interfaces rather than embedding into the
//! dispatch framework.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::BlobStore;
pub use interfaces::BlobStoreError;
pub use interfaces::CertificateSource;
pub use interfaces::CertificateSourceError;
pub use interfaces::CsrError;
pub use interfaces::CsrFactory;
pub use interfaces::ProcessSupervisor;
pub use interfaces::SupervisorError;
pub use runtime::CertificateOutcome;
pub use runtime::CleanupError;
pub use runtime::InMemoryBlobStore;
pub use runtime::InMemorySupervisor;
pub use runtime::LegacyCsrFlow;
pub use runtime::LegacyFlowError;
pub use runtime::ReconcileError;
pub use runtime::ReconcileOutcome;
pub use runtime::Reconciler;
pub use runtime::RenderError;
