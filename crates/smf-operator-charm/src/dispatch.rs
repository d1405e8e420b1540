// crates/smf-operator-charm/src/dispatch.rs
// ============================================================================
// Module: Event Dispatch
// Description: Dispatch table routing hook events to reconcile, status, and cleanup.
// Purpose: Run the full-recompute cycle for every trigger through one registry.
// Dependencies: crate::{hook, tools}, smf-operator-core, smf-operator-relations
// ============================================================================

//! ## Overview
//! Handlers are registered once at process start into an explicit dispatch
//! table; lookup walks the registered routes in order and runs the actions
//! of the first match. Every action assembles a fresh signal snapshot, so a
//! status collection after a reconcile observes the reconciled world.
//! Invariants:
//! - Routes with an endpoint bind more tightly than endpoint-less routes
//!   and must be registered first.
//! - TLS cleanup is never skipped; an unreachable container defers it to
//!   the next trigger.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use thiserror::Error;

use smf_operator_core::BlobStore;
use smf_operator_core::BlobStoreError;
use smf_operator_core::CertificateRequest;
use smf_operator_core::CertificateSource;
use smf_operator_core::CleanupError;
use smf_operator_core::LegacyCsrFlow;
use smf_operator_core::LegacyFlowError;
use smf_operator_core::ProcessSupervisor;
use smf_operator_core::ReconcileError;
use smf_operator_core::ReconcileOutcome;
use smf_operator_core::Reconciler;
use smf_operator_core::Relation;
use smf_operator_core::SignalSnapshot;
use smf_operator_core::SupervisorError;
use smf_operator_core::core::workload::CERTIFICATE_PATH;
use smf_operator_core::core::workload::CSR_PATH;
use smf_operator_core::core::workload::PFCP_PORT;
use smf_operator_core::core::workload::PRIVATE_KEY_PATH;
use smf_operator_core::core::workload::PROMETHEUS_PORT;
use smf_operator_core::core::workload::SBI_PORT;
use smf_operator_core::core::workload::SERVICE_NAME;
use smf_operator_core::core::workload::WORKLOAD_VERSION_PATH;
use smf_operator_core::runtime::cleanup_certificate;
use smf_operator_core::runtime::evaluate;
use smf_operator_core::runtime::ready_to_configure;
use smf_operator_relations::RcgenCsrFactory;
use smf_operator_relations::RelationCertificateSource;
use smf_operator_relations::database_data;
use smf_operator_relations::nrf_url;
use smf_operator_relations::provider_certificates;
use smf_operator_relations::webui_url;

use crate::hook::EventKind;
use crate::hook::HookEvent;
use crate::tools::HookToolError;
use crate::tools::HookTools;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Storage name holding the configuration mount.
const STORAGE_NAME: &str = "config";

/// Relation endpoint of the certificate provider.
const CERTIFICATES_ENDPOINT: &str = "certificates";

/// Unit databag field carrying outstanding CSRs.
const CSR_DATABAG_FIELD: &str = "certificate_signing_requests";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Dispatch errors.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A hook tool invocation failed.
    #[error(transparent)]
    Tool(#[from] HookToolError),
    /// Stored bytes could not be read or written.
    #[error(transparent)]
    Store(#[from] BlobStoreError),
    /// The supervisor could not be driven.
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
    /// Reconciliation failed mid-cycle.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    /// Certificate provisioning failed.
    #[error(transparent)]
    Certificates(#[from] LegacyFlowError),
    /// A handler re-entered while the backends were checked out.
    #[error("backends are checked out")]
    BackendsCheckedOut,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// One action a registered route runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Declare the workload ports on the unit.
    DeclarePorts,
    /// Run one full reconciliation cycle.
    Reconcile,
    /// Delete stored TLS material.
    CleanupCertificates,
    /// Evaluate readiness and report unit status.
    CollectStatus,
}

/// One registered route in the dispatch table.
#[derive(Debug, Clone)]
struct Route {
    /// Event kind the route matches.
    kind: EventKind,
    /// Relation endpoint the route is restricted to, when any.
    endpoint: Option<&'static str>,
    /// Actions to run, in order.
    actions: Vec<Action>,
}

/// Dispatch table populated once at process start.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Registered routes in lookup order.
    routes: Vec<Route>,
}

impl Registry {
    /// Builds an empty registry.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            routes: Vec::new(),
        }
    }

    /// Registers a route. Endpoint-restricted routes must be registered
    /// before endpoint-less routes of the same kind.
    pub fn register(&mut self, kind: EventKind, endpoint: Option<&'static str>, actions: &[Action]) {
        self.routes.push(Route {
            kind,
            endpoint,
            actions: actions.to_vec(),
        });
    }

    /// Builds the standard routing of this operator.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        let converge = &[Action::Reconcile, Action::CollectStatus];
        registry.register(EventKind::Install, None, &[
            Action::DeclarePorts,
            Action::Reconcile,
            Action::CollectStatus,
        ]);
        registry.register(EventKind::UpgradeCharm, None, &[
            Action::DeclarePorts,
            Action::Reconcile,
            Action::CollectStatus,
        ]);
        registry.register(EventKind::UpdateStatus, None, converge);
        registry.register(EventKind::PebbleReady, None, converge);
        registry.register(EventKind::StorageAttached, None, converge);
        registry.register(EventKind::RelationJoined, None, converge);
        registry.register(EventKind::RelationChanged, None, converge);
        registry.register(EventKind::RelationDeparted, None, converge);
        registry.register(EventKind::RelationBroken, Some(CERTIFICATES_ENDPOINT), &[
            Action::CleanupCertificates,
            Action::CollectStatus,
        ]);
        registry.register(EventKind::RelationBroken, None, converge);
        registry.register(EventKind::CollectUnitStatus, None, &[Action::CollectStatus]);
        registry
    }

    /// Returns the actions of the first route matching the event.
    #[must_use]
    pub fn actions(&self, event: &HookEvent) -> &[Action] {
        self.routes
            .iter()
            .find(|route| {
                route.kind == event.kind()
                    && route.endpoint.is_none_or(|endpoint| Some(endpoint) == event.endpoint())
            })
            .map_or(&[], |route| route.actions.as_slice())
    }
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Hook event dispatcher over injected backends.
///
/// # Invariants
/// - Backends are checked out only for the duration of one engine run and
///   always returned, including on error.
pub struct Dispatcher<T, B, S> {
    /// Juju-facing hook tool access.
    tools: T,
    /// Blob store and supervisor, absent only while an engine run holds them.
    backends: Option<(B, S)>,
    /// Registered dispatch table.
    registry: Registry,
    /// Cluster-internal hostname the SBI endpoint registers under.
    hostname: String,
    /// Whether the workload container accepts operations this dispatch.
    container_ready: bool,
}

impl<T, B, S> Dispatcher<T, B, S>
where
    T: HookTools,
    B: BlobStore,
    S: ProcessSupervisor,
{
    /// Builds a dispatcher over the given backends and routing.
    pub fn new(
        tools: T,
        store: B,
        supervisor: S,
        registry: Registry,
        hostname: impl Into<String>,
        container_ready: bool,
    ) -> Self {
        Self {
            tools,
            backends: Some((store, supervisor)),
            registry,
            hostname: hostname.into(),
            container_ready,
        }
    }

    /// Routes one hook event through the registered actions.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when a backend or hook tool fails.
    pub fn dispatch(&mut self, event: &HookEvent) -> Result<(), DispatchError> {
        let actions = self.registry.actions(event).to_vec();
        if actions.is_empty() {
            tracing::debug!(event = ?event, "no route registered");
            return Ok(());
        }
        for action in actions {
            match action {
                Action::DeclarePorts => self.declare_ports()?,
                Action::Reconcile => self.reconcile()?,
                Action::CleanupCertificates => self.cleanup_certificates()?,
                Action::CollectStatus => self.collect_status()?,
            }
        }
        Ok(())
    }

    /// Returns the hook tools backend.
    pub const fn tools(&self) -> &T {
        &self.tools
    }

    /// Returns the blob store backend.
    pub fn store(&self) -> Option<&B> {
        self.backends.as_ref().map(|(store, _)| store)
    }

    /// Returns the supervisor backend.
    pub fn supervisor(&self) -> Option<&S> {
        self.backends.as_ref().map(|(_, supervisor)| supervisor)
    }

    // ------------------------------------------------------------------
    // Snapshot assembly
    // ------------------------------------------------------------------

    /// Assembles a fresh signal snapshot from the hook tools and backends.
    fn assemble_snapshot(&self) -> Result<SignalSnapshot, DispatchError> {
        let leader = self.tools.is_leader()?;
        let mut relations = BTreeSet::new();
        for relation in Relation::ALL {
            if self.tools.relation_exists(relation.endpoint())? {
                relations.insert(relation);
            }
        }
        let database = self
            .tools
            .remote_application_databag(Relation::Database.endpoint())?
            .as_ref()
            .and_then(database_data);
        let nrf = self
            .tools
            .remote_application_databag(Relation::FivegNrf.endpoint())?
            .as_ref()
            .and_then(nrf_url);
        let webui = self
            .tools
            .remote_application_databag(Relation::SdcoreConfig.endpoint())?
            .as_ref()
            .and_then(webui_url);
        let storage_attached = self.tools.storage_attached(STORAGE_NAME)?;
        let pod_ip = self.tools.private_address()?.and_then(|address| address.parse::<Ipv4Addr>().ok());
        let certificate = self.certificate_source()?.assigned_certificate(&CertificateRequest::smf());
        let (_, supervisor) = self.backends_ref()?;
        let service_running =
            self.container_ready && supervisor.is_running(SERVICE_NAME).unwrap_or(false);
        Ok(SignalSnapshot {
            leader,
            relations,
            container_ready: self.container_ready,
            database,
            nrf_url: nrf,
            webui_url: webui,
            storage_attached,
            pod_ip,
            certificate,
            service_running,
        })
    }

    /// Builds the relation-backed certificate source from the provider
    /// databag and the stored key and CSR.
    fn certificate_source(&self) -> Result<RelationCertificateSource, DispatchError> {
        let entries = self
            .tools
            .remote_application_databag(CERTIFICATES_ENDPOINT)?
            .as_ref()
            .map(provider_certificates)
            .unwrap_or_default();
        let (store, _) = self.backends_ref()?;
        let private_key = read_string(store, PRIVATE_KEY_PATH)?;
        let csr = read_string(store, CSR_PATH)?;
        Ok(RelationCertificateSource::new(entries, private_key, csr))
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Declares the SBI, PFCP, and metrics ports on the unit.
    fn declare_ports(&mut self) -> Result<(), DispatchError> {
        self.tools.open_port("tcp", SBI_PORT)?;
        self.tools.open_port("udp", PFCP_PORT)?;
        self.tools.open_port("tcp", PROMETHEUS_PORT)?;
        Ok(())
    }

    /// Runs one full reconciliation cycle.
    fn reconcile(&mut self) -> Result<(), DispatchError> {
        let snapshot = self.assemble_snapshot()?;

        // Provisioning shares the configuration gate: only a leader with
        // every precondition met may write key or CSR material.
        if ready_to_configure(&snapshot) {
            self.provision_certificate_request()?;
        }
        if snapshot.leader
            && self.container_ready
            && !snapshot.relations.contains(&Relation::Certificates)
        {
            self.remove_leftover_tls_material()?;
        }

        let source = self.certificate_source()?;
        let (store, supervisor) = self.take_backends()?;
        let mut engine = Reconciler::new(store, supervisor, source, self.hostname.clone());
        let result = engine.reconcile(&snapshot);
        let (store, supervisor, _) = engine.into_parts();
        self.backends = Some((store, supervisor));

        match result? {
            ReconcileOutcome::Skipped => {
                tracing::info!("preconditions unmet; nothing applied");
            }
            ReconcileOutcome::AwaitingCertificates => {
                tracing::info!("no certificate pair assigned yet");
            }
            ReconcileOutcome::Converged {
                certificate_written,
                config_written,
                plan_applied,
                restarted,
            } => {
                tracing::info!(
                    certificate_written,
                    config_written,
                    plan_applied,
                    restarted,
                    "reconciliation converged"
                );
            }
        }
        Ok(())
    }

    /// Generates and publishes the private key and CSR when missing.
    /// Callers must hold the configuration gate before entering.
    fn provision_certificate_request(&mut self) -> Result<(), DispatchError> {
        let flow = LegacyCsrFlow::new(RcgenCsrFactory::new());
        let mut source = self.certificate_source()?;
        {
            let (store, _) = self.backends_mut()?;
            flow.ensure_private_key(store)?;
            flow.ensure_csr(store, &mut source)?;
        }
        for csr in source.submitted_requests() {
            let payload = serde_json::json!([{ "certificate_signing_request": csr.trim() }]).to_string();
            self.tools.publish_unit_data(CERTIFICATES_ENDPOINT, CSR_DATABAG_FIELD, &payload)?;
        }
        Ok(())
    }

    /// Removes TLS material that outlived its relation. Idempotent.
    fn remove_leftover_tls_material(&mut self) -> Result<(), DispatchError> {
        let (store, _) = self.backends_mut()?;
        let leftover = store.exists(PRIVATE_KEY_PATH)?
            || store.exists(CERTIFICATE_PATH)?
            || store.exists(CSR_PATH)?;
        if leftover {
            tracing::info!("certificates relation is gone; removing leftover material");
            cleanup_certificate(store)?;
            store.delete(CSR_PATH)?;
        }
        Ok(())
    }

    /// Deletes stored TLS material after the certificates relation broke,
    /// through the engine's cleanup entry point. Defers to the next
    /// trigger when the container is unreachable.
    fn cleanup_certificates(&mut self) -> Result<(), DispatchError> {
        let source = self.certificate_source()?;
        let (store, supervisor) = self.take_backends()?;
        let mut engine = Reconciler::new(store, supervisor, source, self.hostname.clone());
        let outcome = engine.handle_certificates_broken(self.container_ready);
        let (mut store, supervisor, _) = engine.into_parts();
        let result = match outcome {
            Ok(()) => store.delete(CSR_PATH).map(|()| true).map_err(DispatchError::from),
            Err(CleanupError::ContainerNotReady) => Ok(false),
            Err(CleanupError::Store(error)) => Err(DispatchError::Store(error)),
        };
        self.backends = Some((store, supervisor));
        if result? {
            tracing::info!("removed stored certificate material");
        } else {
            tracing::warn!("container not ready; certificate cleanup deferred");
        }
        Ok(())
    }

    /// Evaluates readiness and reports unit status and workload version.
    fn collect_status(&mut self) -> Result<(), DispatchError> {
        let snapshot = self.assemble_snapshot()?;
        let status = evaluate(&snapshot);
        if !status.reason().is_empty() {
            tracing::info!(reason = status.reason(), "unit is not active");
        }
        let version = {
            let (store, _) = self.backends_ref()?;
            match store.read(WORKLOAD_VERSION_PATH) {
                Ok(Some(bytes)) => String::from_utf8_lossy(&bytes).trim().to_string(),
                Ok(None) | Err(_) => String::new(),
            }
        };
        if !version.is_empty() {
            self.tools.set_application_version(&version)?;
        }
        self.tools.status_set(&status)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Backend access
    // ------------------------------------------------------------------

    /// Borrows the backends.
    fn backends_ref(&self) -> Result<&(B, S), DispatchError> {
        self.backends.as_ref().ok_or(DispatchError::BackendsCheckedOut)
    }

    /// Mutably borrows the backends.
    fn backends_mut(&mut self) -> Result<&mut (B, S), DispatchError> {
        self.backends.as_mut().ok_or(DispatchError::BackendsCheckedOut)
    }

    /// Checks the backends out for an engine run.
    fn take_backends(&mut self) -> Result<(B, S), DispatchError> {
        self.backends.take().ok_or(DispatchError::BackendsCheckedOut)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a stored blob as a UTF-8 string, `None` when absent.
fn read_string<B: BlobStore>(store: &B, path: &str) -> Result<Option<String>, BlobStoreError> {
    Ok(store.read(path)?.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}
