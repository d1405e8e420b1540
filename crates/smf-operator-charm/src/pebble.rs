// crates/smf-operator-charm/src/pebble.rs
// ============================================================================
// Module: Pebble CLI Supervisor
// Description: Process supervisor over the workload container's Pebble daemon.
// Purpose: Apply service plans and restart the workload through the pebble CLI.
// Dependencies: smf-operator-core, serde_yaml, tempfile
// ============================================================================

//! ## Overview
//! Each charm container exposes the workload's Pebble daemon through a unix
//! socket. The supervisor drives it with the `pebble` CLI: plans are added
//! as combined layers, restarts target the service by name, and readiness
//! is probed by fetching the plan.
//! Invariants:
//! - Layers are applied with `--combine` so repeated applies converge.
//! - An unreachable daemon surfaces as a backend error, not a panic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use smf_operator_core::ProcessSupervisor;
use smf_operator_core::ServicePlan;
use smf_operator_core::SupervisorError;

// ============================================================================
// SECTION: Supervisor
// ============================================================================

/// Layer label used when adding plans.
const LAYER_LABEL: &str = "smf";

/// Process supervisor backed by the `pebble` CLI.
#[derive(Debug, Clone)]
pub struct PebbleCliSupervisor {
    /// Unix socket of the container's Pebble daemon.
    socket: PathBuf,
}

impl PebbleCliSupervisor {
    /// Builds a supervisor over the given Pebble socket.
    pub fn new(socket: impl Into<PathBuf>) -> Self {
        Self {
            socket: socket.into(),
        }
    }

    /// Runs one pebble subcommand and returns its stdout.
    fn run(&self, args: &[&str]) -> Result<String, SupervisorError> {
        let output = Command::new("pebble")
            .env("PEBBLE_SOCKET", &self.socket)
            .args(args)
            .output()
            .map_err(|error| SupervisorError::Backend(format!("pebble: {error}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SupervisorError::Backend(format!("pebble: {}", stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Returns whether the Pebble daemon currently accepts operations.
    #[must_use]
    pub fn container_ready(&self) -> bool {
        self.run(&["plan"]).is_ok()
    }
}

impl ProcessSupervisor for PebbleCliSupervisor {
    fn plan(&self) -> Result<ServicePlan, SupervisorError> {
        let raw = self.run(&["plan"])?;
        if raw.trim().is_empty() {
            return Ok(ServicePlan::default());
        }
        serde_yaml::from_str(&raw).map_err(|error| SupervisorError::Backend(format!("plan parse: {error}")))
    }

    fn apply_plan(&mut self, plan: &ServicePlan) -> Result<(), SupervisorError> {
        let layer = serde_yaml::to_string(plan)
            .map_err(|error| SupervisorError::Backend(format!("layer encode: {error}")))?;
        let mut file = tempfile::NamedTempFile::new()
            .map_err(|error| SupervisorError::Backend(format!("layer file: {error}")))?;
        file.write_all(layer.as_bytes())
            .map_err(|error| SupervisorError::Backend(format!("layer file: {error}")))?;
        let path = file.path().to_string_lossy().into_owned();
        self.run(&["add", "--combine", LAYER_LABEL, &path])?;
        Ok(())
    }

    fn restart(&mut self, service: &str) -> Result<(), SupervisorError> {
        self.run(&["restart", service])?;
        Ok(())
    }

    fn is_running(&self, service: &str) -> Result<bool, SupervisorError> {
        let raw = self.run(&["services", service])?;
        Ok(raw
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().nth(2))
            .any(|current| current == "active"))
    }
}
