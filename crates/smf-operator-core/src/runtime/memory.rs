// crates/smf-operator-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Backends
// Description: In-memory blob store and supervisor implementations.
// Purpose: Deterministic backends for tests and local harnesses.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The in-memory backends record every mutating call so tests can assert
//! on write counts and restart counts, not just final content.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::core::ServicePlan;
use crate::interfaces::BlobStore;
use crate::interfaces::BlobStoreError;
use crate::interfaces::ProcessSupervisor;
use crate::interfaces::SupervisorError;

// ============================================================================
// SECTION: In-Memory Blob Store
// ============================================================================

/// Blob store backed by a map, with a write log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    /// Stored blobs keyed by path.
    blobs: BTreeMap<String, Vec<u8>>,
    /// Paths in the order they were written.
    write_log: Vec<String>,
}

impl InMemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a blob without recording a write.
    pub fn seed(&mut self, path: &str, bytes: &[u8]) {
        self.blobs.insert(path.to_string(), bytes.to_vec());
    }

    /// Returns how many times the path has been written.
    #[must_use]
    pub fn write_count(&self, path: &str) -> usize {
        self.write_log.iter().filter(|written| written.as_str() == path).count()
    }

    /// Returns the total number of writes across all paths.
    #[must_use]
    pub fn total_writes(&self) -> usize {
        self.write_log.len()
    }

    /// Returns the stored bytes at the path, when present.
    #[must_use]
    pub fn contents(&self, path: &str) -> Option<&[u8]> {
        self.blobs.get(path).map(Vec::as_slice)
    }
}

impl BlobStore for InMemoryBlobStore {
    fn exists(&self, path: &str) -> Result<bool, BlobStoreError> {
        Ok(self.blobs.contains_key(path))
    }

    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        Ok(self.blobs.get(path).cloned())
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), BlobStoreError> {
        self.blobs.insert(path.to_string(), bytes.to_vec());
        self.write_log.push(path.to_string());
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<(), BlobStoreError> {
        self.blobs.remove(path);
        Ok(())
    }
}

// ============================================================================
// SECTION: In-Memory Supervisor
// ============================================================================

/// Supervisor backed by an in-memory plan and running set.
#[derive(Debug, Clone, Default)]
pub struct InMemorySupervisor {
    /// Currently applied plan.
    plan: ServicePlan,
    /// Services reported running.
    running: BTreeSet<String>,
    /// Services restarted, in call order.
    restarts: Vec<String>,
    /// Number of plan applications.
    plan_applications: usize,
}

impl InMemorySupervisor {
    /// Creates a supervisor with an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a service as running, as the real supervisor would after start.
    pub fn mark_running(&mut self, service: &str) {
        self.running.insert(service.to_string());
    }

    /// Returns how many restarts were issued for the service.
    #[must_use]
    pub fn restart_count(&self, service: &str) -> usize {
        self.restarts.iter().filter(|restarted| restarted.as_str() == service).count()
    }

    /// Returns how many times a plan was applied.
    #[must_use]
    pub const fn plan_applications(&self) -> usize {
        self.plan_applications
    }

    /// Returns the currently applied plan.
    #[must_use]
    pub const fn current_plan(&self) -> &ServicePlan {
        &self.plan
    }
}

impl ProcessSupervisor for InMemorySupervisor {
    fn plan(&self) -> Result<ServicePlan, SupervisorError> {
        Ok(self.plan.clone())
    }

    fn apply_plan(&mut self, plan: &ServicePlan) -> Result<(), SupervisorError> {
        for (name, spec) in &plan.services {
            self.plan.services.insert(name.clone(), spec.clone());
        }
        self.plan_applications += 1;
        Ok(())
    }

    fn restart(&mut self, service: &str) -> Result<(), SupervisorError> {
        if !self.plan.services.contains_key(service) {
            return Err(SupervisorError::Backend(format!("unknown service: {service}")));
        }
        self.running.insert(service.to_string());
        self.restarts.push(service.to_string());
        Ok(())
    }

    fn is_running(&self, service: &str) -> Result<bool, SupervisorError> {
        Ok(self.running.contains(service))
    }
}
