// crates/smf-operator-charm/src/rootfs.rs
// ============================================================================
// Module: Rootfs Blob Store
// Description: Blob store over the workload container's mounted filesystem.
// Purpose: Give the engine real byte storage keyed by workload-absolute paths.
// Dependencies: smf-operator-core, std::fs
// ============================================================================

//! ## Overview
//! The charm container mounts the workload filesystem under a fixed root.
//! Paths handed to the store are absolute inside the workload; the store
//! strips the leading separator and resolves them under the mount root.
//! Invariants:
//! - Writes create missing parent directories.
//! - Deleting an absent file is a no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use smf_operator_core::BlobStore;
use smf_operator_core::BlobStoreError;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Blob store resolving workload-absolute paths under a mount root.
#[derive(Debug, Clone)]
pub struct RootfsBlobStore {
    /// Mount root of the workload filesystem.
    root: PathBuf,
}

impl RootfsBlobStore {
    /// Builds a store over the given mount root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Resolves a workload-absolute path under the mount root.
    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// Creates the parent directory chain of a resolved path.
    fn ensure_parent(resolved: &Path) -> Result<(), BlobStoreError> {
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent).map_err(|error| BlobStoreError::Backend(error.to_string()))?;
        }
        Ok(())
    }
}

impl BlobStore for RootfsBlobStore {
    fn exists(&self, path: &str) -> Result<bool, BlobStoreError> {
        Ok(self.resolve(path).is_file())
    }

    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        match fs::read(self.resolve(path)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(BlobStoreError::Backend(error.to_string())),
        }
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), BlobStoreError> {
        let resolved = self.resolve(path);
        Self::ensure_parent(&resolved)?;
        fs::write(resolved, bytes).map_err(|error| BlobStoreError::Backend(error.to_string()))
    }

    fn delete(&mut self, path: &str) -> Result<(), BlobStoreError> {
        match fs::remove_file(self.resolve(path)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(BlobStoreError::Backend(error.to_string())),
        }
    }
}
