// crates/smf-operator-charm/src/lib.rs
// ============================================================================
// Module: Charm Dispatch Library
// Description: Hook-event routing and Juju-facing backends for the operator.
// Purpose: Wire the reconciliation engine to hook tools, Pebble, and the rootfs.
// Dependencies: smf-operator-core, smf-operator-relations, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! The charm binary runs once per Juju dispatch: it parses the hook event,
//! assembles a fresh signal snapshot through the hook tools, and routes the
//! event through an explicitly registered dispatch table. Every handler
//! recomputes the world from scratch; nothing persists between dispatches
//! except what the workload container stores.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Dispatch table and handler execution.
pub mod dispatch;
/// Hook event parsing from dispatch paths.
pub mod hook;
/// Pebble CLI process supervisor.
pub mod pebble;
/// Workload rootfs blob store.
pub mod rootfs;
/// Hook tool subprocess access.
pub mod tools;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use dispatch::Action;
pub use dispatch::DispatchError;
pub use dispatch::Dispatcher;
pub use dispatch::Registry;
pub use hook::EventKind;
pub use hook::HookEvent;
pub use pebble::PebbleCliSupervisor;
pub use rootfs::RootfsBlobStore;
pub use tools::HookToolError;
pub use tools::HookTools;
pub use tools::JujuHookTools;
