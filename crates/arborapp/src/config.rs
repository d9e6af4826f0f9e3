//! # Configuration
//!
//! Arbor configuration is managed by [`confique`], which handles layered
//! loading from TOML files and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `ARBOR_BACKEND`, `ARBOR_DATA_DIR`, etc.
//! 2. **Project Config**: `.arbor/arbor.toml` in the working directory.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `fs` | `fs` (local directory) or `http` (structure server) |
//! | `data_dir` | `.arbor/estructuras` | Directory used by the `fs` backend |
//! | `server_url` | `http://127.0.0.1:3001` | Base URL used by the `http` backend |
//! | `structure` | `estructura.json` | Structure opened when none is named |
//! | `history_limit` | `50` | Undo depth |
//! | `default_name` | `New folder` | Name of freshly added folders |
//! | `listen` | `127.0.0.1:3001` | Address `arbor serve` binds to |

use crate::error::{ArborError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Project-local directory holding config and (by default) structures.
pub const PROJECT_DIR: &str = ".arbor";
pub const CONFIG_FILE: &str = "arbor.toml";

/// Configuration for arbor, stored in `arbor.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArborConfig {
    /// Storage backend: "fs" or "http".
    #[config(env = "ARBOR_BACKEND", default = "fs")]
    pub backend: String,

    /// Directory for the fs backend. Relative paths resolve against the
    /// working directory. When absent, `.arbor/estructuras`.
    #[config(env = "ARBOR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the structure server for the http backend.
    #[config(env = "ARBOR_SERVER_URL", default = "http://127.0.0.1:3001")]
    pub server_url: String,

    /// Structure opened when none is given on the command line.
    #[config(env = "ARBOR_STRUCTURE", default = "estructura.json")]
    pub structure: String,

    #[config(env = "ARBOR_HISTORY_LIMIT", default = 50)]
    pub history_limit: usize,

    #[config(env = "ARBOR_DEFAULT_NAME", default = "New folder")]
    pub default_name: String,

    /// Listen address for `arbor serve`.
    #[config(env = "ARBOR_LISTEN", default = "127.0.0.1:3001")]
    pub listen: String,
}

impl Default for ArborConfig {
    fn default() -> Self {
        Self {
            backend: "fs".to_string(),
            data_dir: None,
            server_url: "http://127.0.0.1:3001".to_string(),
            structure: crate::store::DEFAULT_STRUCTURE.to_string(),
            history_limit: crate::history::DEFAULT_HISTORY_LIMIT,
            default_name: crate::model::DEFAULT_NODE_NAME.to_string(),
            listen: "127.0.0.1:3001".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Fs,
    Http,
}

impl FromStr for BackendKind {
    type Err = ArborError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fs" | "file" | "local" => Ok(BackendKind::Fs),
            "http" | "server" => Ok(BackendKind::Http),
            other => Err(ArborError::Validation(format!(
                "Unknown backend \"{}\" (expected fs or http)",
                other
            ))),
        }
    }
}

impl ArborConfig {
    /// Loads the layered configuration for a working directory.
    pub fn load(cwd: &Path) -> Result<Self> {
        let mut builder = ArborConfig::builder()
            .env()
            .file(project_config_path(cwd));
        if let Some(global) = global_config_path() {
            builder = builder.file(global);
        }
        builder
            .load()
            .map_err(|e| ArborError::Validation(format!("Invalid configuration: {}", e)))
    }

    pub fn backend_kind(&self) -> Result<BackendKind> {
        self.backend.parse()
    }

    /// The fs backend directory, resolved against `cwd`.
    pub fn data_dir(&self, cwd: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join(PROJECT_DIR).join("estructuras"),
        }
    }
}

pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(PROJECT_DIR).join(CONFIG_FILE)
}

/// `arbor.toml` in the OS config directory, if one can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "arbor").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
