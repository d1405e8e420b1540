// crates/smf-operator-core/src/runtime/mod.rs
// ============================================================================
// Module: Operator Runtime
// Description: Readiness evaluation, certificate management, rendering, reconciliation.
// Purpose: Group the convergence logic driven on every dispatch.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime is the orchestration layer: a pure readiness evaluator, a
//! diff-based certificate manager, a deterministic renderer, and the
//! reconciler engine that ties them together over injected backends.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod certificates;
pub mod memory;
pub mod readiness;
pub mod reconciler;
pub mod render;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use certificates::CertificateOutcome;
pub use certificates::LegacyCsrFlow;
pub use certificates::LegacyFlowError;
pub use certificates::cleanup_certificate;
pub use certificates::ensure_certificate;
pub use memory::InMemoryBlobStore;
pub use memory::InMemorySupervisor;
pub use readiness::ConfigInputs;
pub use readiness::configuration_inputs;
pub use readiness::evaluate;
pub use readiness::ready_to_configure;
pub use reconciler::CleanupError;
pub use reconciler::ReconcileError;
pub use reconciler::ReconcileOutcome;
pub use reconciler::Reconciler;
pub use render::RenderError;
pub use render::UE_ROUTING_CONFIG;
pub use render::render;
