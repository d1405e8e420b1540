// crates/smf-operator-core/tests/readiness_ordering.rs
// ============================================================================
// Module: Readiness Ordering Tests
// Description: Check-order and reason-string contract of the readiness chain.
// Purpose: Ensure the first failing check, and only that check, is reported.
// ============================================================================

//! Readiness evaluation ordering tests.

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

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use smf_operator_core::CertificateBundle;
use smf_operator_core::DatabaseData;
use smf_operator_core::Relation;
use smf_operator_core::SignalSnapshot;
use smf_operator_core::Status;
use smf_operator_core::runtime::evaluate;
use smf_operator_core::runtime::ready_to_configure;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

fn satisfied_snapshot() -> SignalSnapshot {
    SignalSnapshot {
        leader: true,
        relations: BTreeSet::from(Relation::ALL),
        container_ready: true,
        database: Some(DatabaseData {
            uris: "mongodb://1.2.3.4:27017,mongodb://5.6.7.8:27017".to_string(),
            username: "banana".to_string(),
            password: "pizza".to_string(),
        }),
        nrf_url: Some("https://nrf:443".to_string()),
        webui_url: Some("sdcore-webui-k8s:9876".to_string()),
        storage_attached: true,
        pod_ip: Some(Ipv4Addr::new(1, 1, 1, 1)),
        certificate: Some(CertificateBundle {
            certificate_pem: "whatever cert".to_string(),
            private_key_pem: "whatever key".to_string(),
        }),
        service_running: true,
    }
}

// ============================================================================
// SECTION: Ordered Checks
// ============================================================================

#[test]
fn all_signals_satisfied_yields_active() {
    assert_eq!(evaluate(&satisfied_snapshot()), Status::Active);
}

#[test]
fn non_leader_is_blocked_regardless_of_other_signals() {
    let mut snapshot = satisfied_snapshot();
    snapshot.leader = false;

    assert_eq!(
        evaluate(&snapshot),
        Status::Blocked("Scaling is not implemented for this charm".to_string())
    );
    assert!(!ready_to_configure(&snapshot));
}

#[test]
fn missing_nrf_relation_is_blocked() {
    let mut snapshot = satisfied_snapshot();
    snapshot.relations.remove(&Relation::FivegNrf);

    assert_eq!(evaluate(&snapshot), Status::Blocked("Waiting for fiveg_nrf relation(s)".to_string()));
}

#[test]
fn missing_relations_are_aggregated_in_check_order() {
    let mut snapshot = satisfied_snapshot();
    snapshot.relations.remove(&Relation::Database);
    snapshot.relations.remove(&Relation::SdcoreConfig);

    assert_eq!(
        evaluate(&snapshot),
        Status::Blocked("Waiting for database, sdcore_config relation(s)".to_string())
    );
}

#[test]
fn container_not_ready_is_reported_after_relations() {
    let mut snapshot = satisfied_snapshot();
    snapshot.container_ready = false;
    snapshot.database = None;

    assert_eq!(evaluate(&snapshot), Status::Waiting("Waiting for container to be ready".to_string()));
}

#[test]
fn database_unavailable_is_waiting() {
    let mut snapshot = satisfied_snapshot();
    snapshot.database = None;

    assert_eq!(
        evaluate(&snapshot),
        Status::Waiting("Waiting for the database to be available".to_string())
    );
}

#[test]
fn nrf_unavailable_is_waiting() {
    let mut snapshot = satisfied_snapshot();
    snapshot.nrf_url = None;

    assert_eq!(
        evaluate(&snapshot),
        Status::Waiting("Waiting for NRF relation to be available".to_string())
    );
}

#[test]
fn webui_unavailable_is_waiting() {
    let mut snapshot = satisfied_snapshot();
    snapshot.webui_url = None;

    assert_eq!(evaluate(&snapshot), Status::Waiting("Waiting for Webui data to be available".to_string()));
}

#[test]
fn storage_unattached_is_waiting() {
    let mut snapshot = satisfied_snapshot();
    snapshot.storage_attached = false;

    assert_eq!(evaluate(&snapshot), Status::Waiting("Waiting for storage to be attached".to_string()));
}

#[test]
fn empty_pod_ip_is_waiting_even_when_everything_else_is_satisfied() {
    let mut snapshot = satisfied_snapshot();
    snapshot.pod_ip = None;

    assert_eq!(
        evaluate(&snapshot),
        Status::Waiting("Waiting for pod IP address to be available".to_string())
    );
    assert!(!ready_to_configure(&snapshot));
}

#[test]
fn missing_certificate_pair_is_waiting() {
    let mut snapshot = satisfied_snapshot();
    snapshot.certificate = None;

    assert_eq!(
        evaluate(&snapshot),
        Status::Waiting("Waiting for certificates to be available".to_string())
    );
}

#[test]
fn stopped_service_is_waiting() {
    let mut snapshot = satisfied_snapshot();
    snapshot.service_running = false;

    assert_eq!(evaluate(&snapshot), Status::Waiting("Waiting for SMF service to start".to_string()));
}

// ============================================================================
// SECTION: Configuration Gate
// ============================================================================

#[test]
fn configuration_proceeds_while_certificates_are_pending() {
    let mut snapshot = satisfied_snapshot();
    snapshot.certificate = None;
    snapshot.service_running = false;

    assert!(ready_to_configure(&snapshot));
}

#[test]
fn configuration_is_gated_on_every_upstream_value() {
    for strip in 0..4_u8 {
        let mut snapshot = satisfied_snapshot();
        match strip {
            0 => snapshot.database = None,
            1 => snapshot.nrf_url = None,
            2 => snapshot.webui_url = None,
            _ => snapshot.pod_ip = None,
        }
        assert!(!ready_to_configure(&snapshot), "signal {strip} must gate configuration");
    }
}
