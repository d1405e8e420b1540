// crates/smf-operator-core/src/runtime/reconciler.rs
// ============================================================================
// Module: Reconciler Engine
// Description: Full-recompute convergence of workload configuration and plan.
// Purpose: Apply the minimal diff (write, restart) to reach the desired state.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Every trigger runs the same full reconciliation; there are no
//! event-specific deltas. The engine recomputes the desired configuration,
//! certificate material, and service plan from the signal snapshot, then
//! applies only what differs byte-for-byte. A restart is issued iff
//! certificate or configuration bytes changed this cycle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::DesiredConfig;
use crate::core::SignalSnapshot;
use crate::core::Status;
use crate::core::desired_service_plan;
use crate::core::workload::CONFIG_FILE_PATH;
use crate::core::workload::SERVICE_NAME;
use crate::core::workload::UE_ROUTING_FILE_PATH;
use crate::core::workload::WORKLOAD_VERSION_PATH;
use crate::interfaces::BlobStore;
use crate::interfaces::BlobStoreError;
use crate::interfaces::CertificateSource;
use crate::interfaces::ProcessSupervisor;
use crate::interfaces::SupervisorError;
use crate::runtime::certificates::cleanup_certificate;
use crate::runtime::certificates::ensure_certificate;
use crate::runtime::readiness;
use crate::runtime::render::RenderError;
use crate::runtime::render::UE_ROUTING_CONFIG;
use crate::runtime::render::render;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Reconciliation errors.
///
/// "Not yet available" conditions are not errors; they surface as
/// [`ReconcileOutcome`] variants instead.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Stored bytes could not be read or written.
    #[error(transparent)]
    Store(#[from] BlobStoreError),
    /// The supervisor plan could not be fetched or applied.
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
    /// The configuration template failed; indicates a packaging bug.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// TLS cleanup errors.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// The container is unreachable; the caller must retry on a later
    /// trigger. Cleanup is never skipped.
    #[error("container is not ready for cleanup")]
    ContainerNotReady,
    /// Stored material could not be deleted.
    #[error(transparent)]
    Store(#[from] BlobStoreError),
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Result of one reconciliation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Preconditions unmet; nothing was touched.
    Skipped,
    /// Configured as far as possible; no certificate pair issued yet.
    AwaitingCertificates,
    /// Desired state reached; fields record what changed this cycle.
    Converged {
        /// Whether certificate or key bytes were written.
        certificate_written: bool,
        /// Whether configuration bytes were written.
        config_written: bool,
        /// Whether the service plan was (re)applied.
        plan_applied: bool,
        /// Whether the service was restarted.
        restarted: bool,
    },
}

// ============================================================================
// SECTION: Reconciler
// ============================================================================

/// Reconciliation engine over injected backends.
///
/// # Invariants
/// - Only the elected leader may reach a mutating call; the gate runs first
///   on every entry point.
/// - One reconciliation runs at a time; the engine holds no state between
///   cycles beyond what the backends persist.
pub struct Reconciler<B, S, C> {
    /// Workload filesystem access.
    store: B,
    /// Process supervisor for the workload container.
    supervisor: S,
    /// Certificate authority access.
    certificates: C,
    /// Cluster-internal hostname the SBI endpoint registers under.
    hostname: String,
}

impl<B, S, C> Reconciler<B, S, C>
where
    B: BlobStore,
    S: ProcessSupervisor,
    C: CertificateSource,
{
    /// Creates a reconciler over the given backends.
    pub fn new(store: B, supervisor: S, certificates: C, hostname: impl Into<String>) -> Self {
        Self {
            store,
            supervisor,
            certificates,
            hostname: hostname.into(),
        }
    }

    /// Runs one full reconciliation cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when a backend fails mid-cycle; unmet
    /// preconditions are reported through the outcome, not as errors.
    pub fn reconcile(&mut self, snapshot: &SignalSnapshot) -> Result<ReconcileOutcome, ReconcileError> {
        let Some(inputs) = readiness::configuration_inputs(snapshot) else {
            return Ok(ReconcileOutcome::Skipped);
        };

        if !self.store.exists(UE_ROUTING_FILE_PATH)? {
            self.store.write(UE_ROUTING_FILE_PATH, UE_ROUTING_CONFIG.as_bytes())?;
        }

        let certificate = ensure_certificate(&self.certificates, &mut self.store)?;
        if !certificate.available {
            return Ok(ReconcileOutcome::AwaitingCertificates);
        }

        let desired = DesiredConfig::assemble(
            inputs.database,
            inputs.nrf_url,
            inputs.webui_url,
            inputs.pod_ip,
            &self.hostname,
        );
        let content = render(&desired)?;

        let config_written = self.store.read(CONFIG_FILE_PATH)?.as_deref() != Some(content.as_bytes());
        if config_written {
            self.store.write(CONFIG_FILE_PATH, content.as_bytes())?;
        }

        let restart = certificate.updated || config_written;

        let desired_plan = desired_service_plan(inputs.pod_ip);
        let current_plan = self.supervisor.plan()?;
        let plan_applied = current_plan.smf_service() != desired_plan.smf_service();
        if plan_applied {
            self.supervisor.apply_plan(&desired_plan)?;
        }
        if restart {
            self.supervisor.restart(SERVICE_NAME)?;
        }

        Ok(ReconcileOutcome::Converged {
            certificate_written: certificate.updated,
            config_written,
            plan_applied,
            restarted: restart,
        })
    }

    /// Deletes stored TLS material after the certificates relation broke.
    ///
    /// # Errors
    ///
    /// Returns [`CleanupError::ContainerNotReady`] when the container is
    /// unreachable; the caller must retry on a later trigger rather than
    /// skip the cleanup.
    pub fn handle_certificates_broken(&mut self, container_ready: bool) -> Result<(), CleanupError> {
        if !container_ready {
            return Err(CleanupError::ContainerNotReady);
        }
        cleanup_certificate(&mut self.store)?;
        Ok(())
    }

    /// Evaluates the full readiness chain for status collection.
    #[must_use]
    pub fn evaluate_status(&self, snapshot: &SignalSnapshot) -> Status {
        readiness::evaluate(snapshot)
    }

    /// Reads the workload version marker, best-effort.
    /// Absent or unreadable markers yield an empty string.
    #[must_use]
    pub fn workload_version(&self) -> String {
        match self.store.read(WORKLOAD_VERSION_PATH) {
            Ok(Some(bytes)) => String::from_utf8_lossy(&bytes).trim().to_string(),
            Ok(None) | Err(_) => String::new(),
        }
    }

    /// Returns the blob store backend.
    pub const fn store(&self) -> &B {
        &self.store
    }

    /// Returns the supervisor backend.
    pub const fn supervisor(&self) -> &S {
        &self.supervisor
    }

    /// Consumes the reconciler and returns its backends.
    pub fn into_parts(self) -> (B, S, C) {
        (self.store, self.supervisor, self.certificates)
    }
}
