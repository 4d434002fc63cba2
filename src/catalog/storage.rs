//! Persistence of the cluster catalog as a single binary blob

use crate::catalog::model::ClusterCatalog;
use crate::io::configuration::CATALOG_FILE_NAME;
use crate::io::error::{AnalysisError, Result, file_system_error};
use log::debug;
use std::path::{Path, PathBuf};

/// Location of a persisted catalog
///
/// The blob lives at `<root>/dict_clusters.bin`. It carries no version tag; a blob written
/// by an incompatible build fails to decode rather than being migrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    /// Store rooted at a runtime directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Runtime directory holding the blob
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the blob
    pub fn path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE_NAME)
    }

    /// Check whether a blob is present
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Load the stored catalog
    ///
    /// Returns `Ok(None)` when no blob exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The blob exists but cannot be read
    /// - The blob cannot be decoded into a catalog ([`AnalysisError::CatalogCorrupt`])
    pub fn load(&self) -> Result<Option<ClusterCatalog>> {
        let path = self.path();
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(file_system_error(path, "read catalog", e)),
        };

        let catalog = bincode::deserialize(&bytes)
            .map_err(|e| AnalysisError::CatalogCorrupt { path: path.clone(), source: e })?;
        debug!("Decoded {} bytes from {}", bytes.len(), path.display());

        Ok(Some(catalog))
    }

    /// Persist a catalog, creating the runtime directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The runtime directory cannot be created
    /// - The catalog cannot be encoded
    /// - The blob cannot be written
    pub fn save(&self, catalog: &ClusterCatalog) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| file_system_error(&self.root, "create directory", e))?;

        let path = self.path();
        let bytes = bincode::serialize(catalog).map_err(|e| AnalysisError::CatalogEncode {
            path: path.clone(),
            source: e,
        })?;

        std::fs::write(&path, &bytes).map_err(|e| file_system_error(&path, "write catalog", e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Ok(())
    }

    /// Delete the stored blob so the next cache construction recomputes
    ///
    /// Returns whether a blob was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing blob cannot be removed
    pub fn remove(&self) -> Result<bool> {
        let path = self.path();
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(file_system_error(path, "remove catalog", e)),
        }
    }
}
