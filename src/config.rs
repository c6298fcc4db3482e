//! Configuration loading and management
//!
//! Handles parsing of `.hyd.toml` configuration files.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Actor configuration
    #[serde(default)]
    pub actor: ActorConfig,

    /// Tasks configuration
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actor: ActorConfig::default(),
            tasks: TasksConfig::default(),
        }
    }
}

/// Actor-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Default actor name when none is specified
    #[serde(default = "default_actor")]
    pub default: String,

    /// Role assumed for actors missing from the roster
    #[serde(default = "default_role")]
    pub default_role: String,
}

fn default_actor() -> String {
    "unknown".to_string()
}

fn default_role() -> String {
    "municipal".to_string()
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            default: default_actor(),
            default_role: default_role(),
        }
    }
}

/// Task-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Board commands operate on when none is given
    #[serde(default = "default_board")]
    pub default_board: String,

    /// Prefix for generated task ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Duration label assigned when a new task omits one
    #[serde(default = "default_duration")]
    pub default_duration: String,
}

fn default_board() -> String {
    "planning".to_string()
}

fn default_id_prefix() -> String {
    "TK".to_string()
}

fn default_duration() -> String {
    "1h00".to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_board: default_board(),
            id_prefix: default_id_prefix(),
            default_duration: default_duration(),
        }
    }
}

impl Config {
    /// Load configuration from `.hyd.toml` under the storage root.
    ///
    /// A missing file yields the defaults; a file that fails to parse is
    /// a configuration error rather than a silent fallback.
    pub fn load(storage: &Storage) -> Result<Config> {
        let path = storage.config_file();
        if !path.exists() {
            return Ok(Config::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw).map_err(|err| Error::InvalidConfig(err.to_string()))
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
