//! Config loading facade: the single entry point for building a `ReshapeConfig`.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::ReshapeConfig;
use crate::error::ReshapeError;
use config::File;
use std::path::Path;

/// Loads configuration from defaults and file sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a run started in `working_dir`.
    ///
    /// Defaults, then the global file, then `working_dir/reshape.toml`.
    pub fn load(working_dir: &Path) -> Result<ReshapeConfig, ReshapeError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, working_dir)?;

        let config: ReshapeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from one explicit file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<ReshapeConfig, ReshapeError> {
        if !path.is_file() {
            return Err(ReshapeError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let config: ReshapeConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
