//! JSON-file catalog persistence.
//!
//! The catalog lives in a single pretty-printed JSON document at
//! `~/.config/examplan[-dev]/catalog.json`. Set EXAMPLAN_ENV=dev to use the
//! development data directory.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::StorageError;

/// Returns `~/.config/examplan[-dev]/` based on EXAMPLAN_ENV.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("EXAMPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("examplan-dev")
    } else {
        base_dir.join("examplan")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Catalog file handle: owns the path and the loaded document.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    pub catalog: Catalog,
}

impl CatalogStore {
    /// Open the catalog at `path`, starting from an empty catalog when the
    /// file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let catalog = if path.exists() {
            Self::read(&path)?
        } else {
            Catalog::default()
        };
        Ok(Self { path, catalog })
    }

    /// Open the catalog at the default location.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf, StorageError> {
        Ok(data_dir()?.join("catalog.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<Catalog, StorageError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StorageError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StorageError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist the catalog as pretty JSON.
    pub fn save(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.catalog).map_err(StorageError::SerializeFailed)?;
        std::fs::write(&self.path, raw).map_err(|source| StorageError::WriteFailed {
            path: self.path.to_path_buf(),
            source,
        })
    }
}
