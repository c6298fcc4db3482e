//! Storage layer for hyd
//!
//! All persistent state lives under a single `.hyd/` data directory next
//! to the configuration file:
//!
//! ```text
//! <root>/
//!   .hyd.toml                   # Configuration (optional)
//!   .hyd/
//!     tasks.json                # The task store document
//!     roster.json               # Personnel roster (name -> role)
//!     actor                     # Persisted actor identity
//! ```
//!
//! Writes go through a temp-file-plus-rename so a crashed process never
//! leaves a half-written document behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Name of the data directory
pub const DATA_DIR: &str = ".hyd";

/// Name of the configuration file, resolved next to the data directory
pub const CONFIG_FILE: &str = ".hyd.toml";

/// Storage manager for hyd state
#[derive(Debug, Clone)]
pub struct Storage {
    /// Root directory holding `.hyd/` and `.hyd.toml`
    root: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at the given directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    /// Root directory this storage operates in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the `.hyd/` data directory
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// Path to the configuration file
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Path to the task store document
    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir().join("tasks.json")
    }

    /// Path to the personnel roster
    pub fn roster_file(&self) -> PathBuf {
        self.data_dir().join("roster.json")
    }

    /// Path to the persisted actor identity
    pub fn actor_file(&self) -> PathBuf {
        self.data_dir().join("actor")
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Create the data directory if it does not exist yet.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.data_dir())?;
        Ok(())
    }

    /// Check whether the data directory exists.
    pub fn is_initialized(&self) -> bool {
        self.data_dir().exists()
    }

    // =========================================================================
    // File I/O helpers (atomic writes for safety)
    // =========================================================================

    /// Write JSON data atomically (write to temp, then rename).
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(path, json.as_bytes())
    }

    /// Read JSON data from a file.
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Write data atomically using temp file + rename.
    ///
    /// Readers never observe a partially written file: it is either the
    /// previous content or the new content in full.
    pub fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;

        Ok(())
    }
}
