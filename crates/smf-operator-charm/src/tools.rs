// crates/smf-operator-charm/src/tools.rs
// ============================================================================
// Module: Hook Tool Access
// Description: Juju hook tool invocation behind an injectable interface.
// Purpose: Let dispatch read signals and report status without binding to subprocesses.
// Dependencies: smf-operator-core, smf-operator-relations, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Juju exposes unit state exclusively through hook tool binaries on the
//! dispatch `PATH`. [`JujuHookTools`] shells out to them and parses their
//! JSON output; tests substitute canned implementations of [`HookTools`].
//! Invariants:
//! - Queries never mutate Juju state; only the publish and report methods do.
//! - A relation without published data reads as an empty databag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::Command;

use thiserror::Error;

use smf_operator_core::Status;
use smf_operator_relations::Databag;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Hook tool invocation errors.
#[derive(Debug, Error)]
pub enum HookToolError {
    /// The tool could not be run or exited nonzero.
    #[error("hook tool error: {0}")]
    Tool(String),
}

// ============================================================================
// SECTION: Interface
// ============================================================================

/// Unit-facing Juju access used to assemble snapshots and report status.
pub trait HookTools {
    /// Returns whether this unit is the elected leader.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when the query fails.
    fn is_leader(&self) -> Result<bool, HookToolError>;

    /// Returns whether a relation exists on the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when the query fails.
    fn relation_exists(&self, endpoint: &str) -> Result<bool, HookToolError>;

    /// Returns the remote application databag of the endpoint's first
    /// relation, `None` when no relation exists.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when the query fails.
    fn remote_application_databag(&self, endpoint: &str) -> Result<Option<Databag>, HookToolError>;

    /// Publishes a key-value pair into this unit's databag on the
    /// endpoint's first relation. A no-op when no relation exists.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when publishing fails.
    fn publish_unit_data(&mut self, endpoint: &str, key: &str, value: &str) -> Result<(), HookToolError>;

    /// Returns the unit's private address, `None` while unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when the query fails.
    fn private_address(&self) -> Result<Option<String>, HookToolError>;

    /// Returns whether the named storage is attached.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when the query fails.
    fn storage_attached(&self, storage: &str) -> Result<bool, HookToolError>;

    /// Reports the unit status to Juju.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when reporting fails.
    fn status_set(&mut self, status: &Status) -> Result<(), HookToolError>;

    /// Reports the workload application version to Juju.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when reporting fails.
    fn set_application_version(&mut self, version: &str) -> Result<(), HookToolError>;

    /// Declares an open port on the unit.
    ///
    /// # Errors
    ///
    /// Returns [`HookToolError`] when the declaration fails.
    fn open_port(&mut self, protocol: &str, port: u16) -> Result<(), HookToolError>;
}

// ============================================================================
// SECTION: Juju Implementation
// ============================================================================

/// Hook tools backed by the Juju tool binaries on the dispatch `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JujuHookTools;

impl JujuHookTools {
    /// Builds the subprocess-backed hook tools.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs one hook tool and returns its trimmed stdout.
    fn run(tool: &str, args: &[&str]) -> Result<String, HookToolError> {
        let output = Command::new(tool)
            .args(args)
            .output()
            .map_err(|error| HookToolError::Tool(format!("{tool}: {error}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HookToolError::Tool(format!("{tool}: {}", stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Returns the first relation id on the endpoint, `None` when none exist.
    fn first_relation_id(endpoint: &str) -> Result<Option<String>, HookToolError> {
        let raw = Self::run("relation-ids", &[endpoint, "--format=json"])?;
        let ids: Vec<String> = serde_json::from_str(&raw)
            .map_err(|error| HookToolError::Tool(format!("relation-ids: {error}")))?;
        Ok(ids.into_iter().next())
    }
}

impl HookTools for JujuHookTools {
    fn is_leader(&self) -> Result<bool, HookToolError> {
        let raw = Self::run("is-leader", &["--format=json"])?;
        serde_json::from_str(&raw).map_err(|error| HookToolError::Tool(format!("is-leader: {error}")))
    }

    fn relation_exists(&self, endpoint: &str) -> Result<bool, HookToolError> {
        Ok(Self::first_relation_id(endpoint)?.is_some())
    }

    fn remote_application_databag(&self, endpoint: &str) -> Result<Option<Databag>, HookToolError> {
        let Some(relation_id) = Self::first_relation_id(endpoint)? else {
            return Ok(None);
        };
        let raw = Self::run("relation-list", &["-r", &relation_id, "--app", "--format=json"])?;
        let app: String = serde_json::from_str(&raw)
            .map_err(|error| HookToolError::Tool(format!("relation-list: {error}")))?;
        let raw = Self::run("relation-get", &["-r", &relation_id, "--app", "-", &app, "--format=json"])?;
        let databag: Databag = serde_json::from_str(&raw)
            .map_err(|error| HookToolError::Tool(format!("relation-get: {error}")))?;
        Ok(Some(databag))
    }

    fn publish_unit_data(&mut self, endpoint: &str, key: &str, value: &str) -> Result<(), HookToolError> {
        let Some(relation_id) = Self::first_relation_id(endpoint)? else {
            return Ok(());
        };
        let assignment = format!("{key}={value}");
        Self::run("relation-set", &["-r", &relation_id, &assignment])?;
        Ok(())
    }

    fn private_address(&self) -> Result<Option<String>, HookToolError> {
        let address = Self::run("unit-get", &["private-address"])?;
        Ok(if address.is_empty() { None } else { Some(address) })
    }

    fn storage_attached(&self, storage: &str) -> Result<bool, HookToolError> {
        let raw = Self::run("storage-list", &[storage, "--format=json"])?;
        let mounts: Vec<String> = serde_json::from_str(&raw)
            .map_err(|error| HookToolError::Tool(format!("storage-list: {error}")))?;
        Ok(!mounts.is_empty())
    }

    fn status_set(&mut self, status: &Status) -> Result<(), HookToolError> {
        let (level, message) = match status {
            Status::Blocked(reason) => ("blocked", reason.as_str()),
            Status::Waiting(reason) => ("waiting", reason.as_str()),
            Status::Active => ("active", ""),
        };
        Self::run("status-set", &[level, message])?;
        Ok(())
    }

    fn set_application_version(&mut self, version: &str) -> Result<(), HookToolError> {
        Self::run("application-version-set", &[version])?;
        Ok(())
    }

    fn open_port(&mut self, protocol: &str, port: u16) -> Result<(), HookToolError> {
        let spec = format!("{port}/{protocol}");
        Self::run("open-port", &[&spec])?;
        Ok(())
    }
}
