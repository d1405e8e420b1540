// crates/smf-operator-charm/src/main.rs
// ============================================================================
// Module: Charm Dispatch Binary
// Description: Entry point invoked by Juju once per hook dispatch.
// Purpose: Wire real backends to the dispatcher and route the triggering event.
// Dependencies: clap, tracing-subscriber, smf-operator-charm
// ============================================================================

//! ## Overview
//! Juju invokes this binary for every hook with the event encoded in
//! `JUJU_DISPATCH_PATH`. The binary assembles the real backends, registers
//! the standard dispatch table, routes the event, and exits. All state
//! lives in Juju and the workload container; the process itself is
//! stateless.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use smf_operator_charm::DispatchError;
use smf_operator_charm::Dispatcher;
use smf_operator_charm::HookEvent;
use smf_operator_charm::JujuHookTools;
use smf_operator_charm::PebbleCliSupervisor;
use smf_operator_charm::Registry;
use smf_operator_charm::RootfsBlobStore;

// ============================================================================
// SECTION: CLI
// ============================================================================

/// SD-Core SMF operator dispatch binary.
#[derive(Debug, Parser)]
#[command(name = "smf-operator", version, about = "SD-Core SMF Kubernetes operator")]
struct Cli {
    /// Hook name to dispatch; defaults to the JUJU_DISPATCH_PATH environment variable.
    #[arg(long)]
    hook: Option<String>,

    /// Mount root of the workload container filesystem.
    #[arg(long, default_value = "/charm/containers/smf/rootfs")]
    container_root: String,

    /// Unix socket of the workload container's Pebble daemon.
    #[arg(long, default_value = "/charm/containers/smf/pebble.socket")]
    pebble_socket: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Entry point errors.
#[derive(Debug, Error)]
enum MainError {
    /// No hook was given and `JUJU_DISPATCH_PATH` is unset.
    #[error("no hook to dispatch; set --hook or JUJU_DISPATCH_PATH")]
    MissingHook,
    /// A required Juju environment variable is unset.
    #[error("environment variable {0} is unset")]
    MissingEnvironment(&'static str),
    /// Dispatch failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Routes the triggering hook and reports failure through the exit code.
fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "dispatch failed");
            ExitCode::FAILURE
        }
    }
}

/// Parses the invocation and routes the triggering event.
fn run() -> Result<(), MainError> {
    let cli = Cli::parse();
    let hook = cli
        .hook
        .or_else(|| env::var("JUJU_DISPATCH_PATH").ok())
        .ok_or(MainError::MissingHook)?;
    let event = HookEvent::parse(&hook);
    tracing::info!(hook = %hook, "dispatching");

    let supervisor = PebbleCliSupervisor::new(&cli.pebble_socket);
    let container_ready = supervisor.container_ready();
    let mut dispatcher = Dispatcher::new(
        JujuHookTools::new(),
        RootfsBlobStore::new(&cli.container_root),
        supervisor,
        Registry::standard(),
        cluster_hostname()?,
        container_ready,
    );
    dispatcher.dispatch(&event)?;
    Ok(())
}

/// Initializes structured logging; Juju captures stderr into the unit log.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the cluster-internal hostname from the Juju unit and model names.
fn cluster_hostname() -> Result<String, MainError> {
    let unit = env::var("JUJU_UNIT_NAME").map_err(|_| MainError::MissingEnvironment("JUJU_UNIT_NAME"))?;
    let model = env::var("JUJU_MODEL_NAME").map_err(|_| MainError::MissingEnvironment("JUJU_MODEL_NAME"))?;
    let application = unit.split('/').next().unwrap_or(&unit);
    Ok(format!("{application}.{model}.svc.cluster.local"))
}
