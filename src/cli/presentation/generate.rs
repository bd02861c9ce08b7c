//! `gen` presentation: end-of-run summary written to standard error.

use crate::cli::presentation::shared::{heading, push_list};
use crate::generate::GenerateResult;
use crate::progress::humanize_bytes;
use std::path::Path;

pub fn format_generate_summary_text(result: &GenerateResult, root: &Path, color: bool) -> String {
    let mut out = format!(
        "{} {} files ({}) under {}",
        heading("Scanned", color),
        result.manifest.len() + result.omitted,
        humanize_bytes(result.total_bytes),
        root.display()
    );

    push_list(
        &mut out,
        &format!("Skipped unreadable entries ({}):", result.skipped.len()),
        result.skipped.iter().map(|e| e.to_string()),
        color,
    );

    let collision_title = if result.omitted > 0 {
        format!(
            "Hash collisions ({}), {} files omitted from the manifest:",
            result.collisions.len(),
            result.omitted
        )
    } else {
        format!("Hash collisions ({}), all files kept:", result.collisions.len())
    };
    push_list(
        &mut out,
        &collision_title,
        result
            .collisions
            .iter()
            .map(|c| format!("{}; files: {}", c.to_error(), c.targets.join(", "))),
        color,
    );

    out
}
