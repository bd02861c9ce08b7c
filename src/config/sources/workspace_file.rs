//! Working-directory config file source: ./reshape.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// File name looked up in the working directory.
pub const WORKSPACE_CONFIG_FILE: &str = "reshape.toml";

/// Add `<dir>/reshape.toml` to the builder when present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = dir.join(WORKSPACE_CONFIG_FILE);
    if path.is_file() {
        return Ok(builder.add_source(File::from(path).required(false)));
    }
    Ok(builder)
}
