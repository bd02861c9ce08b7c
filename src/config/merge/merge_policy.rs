//! Merge rules: defaults and override order.

use crate::tree::hasher::DEFAULT_CHUNK_SIZE;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// File sources added afterwards override these values key by key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("scan.chunk_size", DEFAULT_CHUNK_SIZE as i64)?
        .set_default("scan.ignore", Vec::<String>::new())?
        .set_default("apply.replace_conflicts", false)
}
