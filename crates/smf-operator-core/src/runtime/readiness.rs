// crates/smf-operator-core/src/runtime/readiness.rs
// ============================================================================
// Module: Readiness Evaluator
// Description: Ordered precondition checks mapping signals to a unit status.
// Purpose: Decide unit status and gate configuration from one pure function.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Readiness evaluation is pure and total: it inspects a signal snapshot and
//! returns the status of the first failing check. The check order and the
//! reason strings are a contract; only the first failure is ever reported.
//! Missing relations are the one aggregated case: all absent endpoints are
//! named in a single message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::Ipv4Addr;

use crate::core::DatabaseData;
use crate::core::SignalSnapshot;
use crate::core::Status;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates the full readiness chain and returns the unit status.
///
/// Checks run in this order, first failure wins: leadership, relation
/// existence, container, database, NRF, webui, storage, pod IP,
/// certificates, service.
#[must_use]
pub fn evaluate(snapshot: &SignalSnapshot) -> Status {
    if !snapshot.leader {
        return Status::Blocked("Scaling is not implemented for this charm".to_string());
    }

    let missing = snapshot.missing_relations();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|relation| relation.endpoint()).collect();
        return Status::Blocked(format!("Waiting for {} relation(s)", names.join(", ")));
    }

    if !snapshot.container_ready {
        return Status::Waiting("Waiting for container to be ready".to_string());
    }

    if snapshot.database.is_none() {
        return Status::Waiting("Waiting for the database to be available".to_string());
    }

    if snapshot.nrf_url.is_none() {
        return Status::Waiting("Waiting for NRF relation to be available".to_string());
    }

    if snapshot.webui_url.is_none() {
        return Status::Waiting("Waiting for Webui data to be available".to_string());
    }

    if !snapshot.storage_attached {
        return Status::Waiting("Waiting for storage to be attached".to_string());
    }

    if snapshot.pod_ip.is_none() {
        return Status::Waiting("Waiting for pod IP address to be available".to_string());
    }

    if snapshot.certificate.is_none() {
        return Status::Waiting("Waiting for certificates to be available".to_string());
    }

    if !snapshot.service_running {
        return Status::Waiting("Waiting for SMF service to start".to_string());
    }

    Status::Active
}

// ============================================================================
// SECTION: Configuration Gate
// ============================================================================

/// Resolved upstream values extracted by the configuration gate.
///
/// Existence of this value proves the "can configure" subset of the
/// readiness chain passed; the renderer relies on that proof instead of
/// re-checking presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigInputs<'snapshot> {
    /// Database connection data.
    pub database: &'snapshot DatabaseData,
    /// NRF URL.
    pub nrf_url: &'snapshot str,
    /// Webui URL.
    pub webui_url: &'snapshot str,
    /// Pod IP address.
    pub pod_ip: Ipv4Addr,
}

/// Runs the "can configure" subset of the readiness chain (leadership,
/// relations, container, database, NRF, webui, storage, pod IP) and
/// extracts the resolved values on success.
///
/// Certificate and service checks are deliberately excluded: configuration
/// must proceed while certificates are still being issued.
#[must_use]
pub fn configuration_inputs(snapshot: &SignalSnapshot) -> Option<ConfigInputs<'_>> {
    if !snapshot.leader || !snapshot.missing_relations().is_empty() {
        return None;
    }
    if !snapshot.container_ready || !snapshot.storage_attached {
        return None;
    }
    let database = snapshot.database.as_ref()?;
    let nrf_url = snapshot.nrf_url.as_deref()?;
    let webui_url = snapshot.webui_url.as_deref()?;
    let pod_ip = snapshot.pod_ip?;
    Some(ConfigInputs {
        database,
        nrf_url,
        webui_url,
        pod_ip,
    })
}

/// Returns whether the preconditions to configure the workload are met.
#[must_use]
pub fn ready_to_configure(snapshot: &SignalSnapshot) -> bool {
    configuration_inputs(snapshot).is_some()
}
