// crates/smf-operator-core/src/core/mod.rs
// ============================================================================
// Module: Core Types
// Description: Value types for signals, status, configuration, and the plan.
// Purpose: Group the recomputed-per-dispatch value model of the operator.
// Dependencies: crate::core::{config, signals, status, workload}
// ============================================================================

//! ## Overview
//! Everything in this module is a value object recomputed on each dispatch.
//! There is no incremental or stateful tracking; equality of current versus
//! desired bytes is the sole change-detection mechanism.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod signals;
pub mod status;
pub mod workload;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::DesiredConfig;
pub use signals::CertificateBundle;
pub use signals::CertificateRequest;
pub use signals::DatabaseData;
pub use signals::Relation;
pub use signals::SignalSnapshot;
pub use status::Status;
pub use workload::OverrideMode;
pub use workload::ServicePlan;
pub use workload::ServiceSpec;
pub use workload::StartupMode;
pub use workload::desired_service_plan;
pub use workload::service_environment;
