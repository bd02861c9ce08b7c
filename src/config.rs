//! Configuration System
//!
//! Layered configuration for scanning, linking and logging. Sources, lowest to
//! highest precedence: built-in defaults, the global config file, then
//! `reshape.toml` in the working directory. An explicit `--config` file
//! replaces file discovery. CLI flags are applied on top by the binary.

use crate::error::ReshapeError;
use crate::logging::LoggingConfig;
use crate::tree::hasher::DEFAULT_CHUNK_SIZE;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReshapeConfig {
    /// Scanner settings, shared by `gen` and the rescan in `apply`
    #[serde(default)]
    pub scan: ScanConfig,

    /// Linker settings
    #[serde(default)]
    pub apply: ApplyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Bytes read per call while streaming file content into the hasher
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Hashing worker threads (None = one per CPU)
    #[serde(default)]
    pub threads: Option<usize>,

    /// Path component names skipped during the walk
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            threads: None,
            ignore: Vec::new(),
        }
    }
}

impl ScanConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            ignore_patterns: self.ignore.clone(),
        }
    }

    /// Validate scanner configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("scan.chunk_size must be greater than zero".to_string());
        }
        if self.threads == Some(0) {
            return Err("scan.threads must be greater than zero".to_string());
        }
        if self.ignore.iter().any(|p| p.is_empty() || p.contains('/')) {
            return Err("scan.ignore entries must be single path components".to_string());
        }
        Ok(())
    }
}

/// Linker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyConfig {
    /// Directory manifest paths are resolved against (None = working directory)
    #[serde(default)]
    pub target: Option<PathBuf>,

    /// Replace a different file found at a target path instead of reporting a conflict
    #[serde(default)]
    pub replace_conflicts: bool,
}

impl ReshapeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ReshapeError> {
        self.scan.validate().map_err(ReshapeError::ConfigError)?;
        if let Some(ref target) = self.apply.target {
            if target.as_os_str().is_empty() {
                return Err(ReshapeError::ConfigError(
                    "apply.target cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
