//! Store Configuration
//!
//! Where a database lives and what it is called.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{DomainError, DomainResult};

/// Database name used by the multi-list board
pub const BOARD_DB_NAME: &str = "todoApp";
/// Database name used by the single-list variant
pub const SINGLE_LIST_DB_NAME: &str = "todoAppSingle";

const STORAGE_KEY_PREFIX: &str = "ringlist";

/// Backing location of a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum StoreLocation {
    /// Lost when the handle is closed
    InMemory,
    /// SQLite database file
    File(PathBuf),
}

/// Configuration for opening a [`crate::TodoDb`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Logical database name
    pub name: String,
    pub location: StoreLocation,
}

impl StoreConfig {
    pub fn in_memory(name: impl Into<String>) -> Self {
        Self { name: name.into(), location: StoreLocation::InMemory }
    }

    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), location: StoreLocation::File(path.into()) }
    }

    /// File store inside the platform data directory (created if missing)
    #[cfg(feature = "sqlite")]
    pub fn default_file(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let dirs = directories::ProjectDirs::from("com", "ringlist", "ringlist")
            .ok_or_else(|| DomainError::Internal("unable to get project dirs".into()))?;
        let dir = dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| DomainError::Internal(format!("create {}: {}", dir.display(), e)))?;
        let path = dir.join(format!("{}.db", name));
        Ok(Self::file(name, path))
    }

    /// Key under which browser engines keep their snapshot
    pub fn storage_key(&self) -> String {
        format!("{}:{}", STORAGE_KEY_PREFIX, self.name)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("database name must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory(BOARD_DB_NAME)
    }
}
