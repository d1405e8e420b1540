// crates/smf-operator-charm/tests/hook_routing.rs
// ============================================================================
// Module: Hook Routing Tests
// Description: Event parsing and dispatch table lookup.
// Purpose: Ensure every trigger routes to the intended actions.
// ============================================================================

//! Hook parsing and registry routing tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use smf_operator_charm::Action;
use smf_operator_charm::HookEvent;
use smf_operator_charm::Registry;

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn dispatch_path_prefix_is_stripped() {
    assert_eq!(HookEvent::parse("hooks/update-status"), HookEvent::UpdateStatus);
}

#[test]
fn pebble_ready_carries_the_container_name() {
    assert_eq!(HookEvent::parse("smf-pebble-ready"), HookEvent::PebbleReady {
        container: "smf".to_string(),
    });
}

#[test]
fn relation_events_carry_the_endpoint() {
    assert_eq!(HookEvent::parse("fiveg_nrf-relation-changed"), HookEvent::RelationChanged {
        endpoint: "fiveg_nrf".to_string(),
    });
    assert_eq!(HookEvent::parse("certificates-relation-broken"), HookEvent::RelationBroken {
        endpoint: "certificates".to_string(),
    });
}

#[test]
fn storage_attached_carries_the_storage_name() {
    assert_eq!(HookEvent::parse("config-storage-attached"), HookEvent::StorageAttached {
        storage: "config".to_string(),
    });
}

#[test]
fn unknown_hooks_parse_without_failing() {
    assert_eq!(HookEvent::parse("secret-rotate"), HookEvent::Other {
        name: "secret-rotate".to_string(),
    });
}

// ============================================================================
// SECTION: Routing
// ============================================================================

#[test]
fn install_declares_ports_before_reconciling() {
    let registry = Registry::standard();

    assert_eq!(registry.actions(&HookEvent::Install), [
        Action::DeclarePorts,
        Action::Reconcile,
        Action::CollectStatus,
    ]);
}

#[test]
fn update_status_reconciles_then_collects_status() {
    let registry = Registry::standard();

    assert_eq!(registry.actions(&HookEvent::UpdateStatus), [Action::Reconcile, Action::CollectStatus]);
}

#[test]
fn broken_certificates_relation_routes_to_cleanup() {
    let registry = Registry::standard();
    let event = HookEvent::parse("certificates-relation-broken");

    assert_eq!(registry.actions(&event), [Action::CleanupCertificates, Action::CollectStatus]);
}

#[test]
fn other_broken_relations_route_to_reconcile() {
    let registry = Registry::standard();
    let event = HookEvent::parse("database-relation-broken");

    assert_eq!(registry.actions(&event), [Action::Reconcile, Action::CollectStatus]);
}

#[test]
fn collect_unit_status_only_collects_status() {
    let registry = Registry::standard();

    assert_eq!(registry.actions(&HookEvent::CollectUnitStatus), [Action::CollectStatus]);
}

#[test]
fn unknown_hooks_route_to_nothing() {
    let registry = Registry::standard();

    assert!(registry.actions(&HookEvent::parse("secret-rotate")).is_empty());
}
