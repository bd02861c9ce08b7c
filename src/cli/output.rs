//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ReshapeError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ReshapeError) -> String {
    match e {
        ReshapeError::MalformedManifest(_) => format!(
            "error: {}\nExpected a JSON array of {{\"path\", \"hash\"}} objects as produced by `reshape gen`.",
            e
        ),
        ReshapeError::CrossDeviceLink { .. } => format!(
            "error: {}\nHardlinks need the source and target on the same filesystem; nothing was copied.",
            e
        ),
        _ => format!("error: {}", e),
    }
}
