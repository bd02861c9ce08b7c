//! `apply` presentation: end-of-run summary of linked and skipped records.

use crate::apply::linker::LinkOutcome;
use crate::apply::ApplyReport;
use crate::cli::presentation::shared::{heading, push_list};
use crate::error::ReshapeError;
use serde_json::json;

pub fn format_apply_summary_text(report: &ApplyReport, color: bool) -> String {
    let title = if report.dry_run {
        "Apply summary (dry run)"
    } else {
        "Apply summary"
    };
    let collided: usize = report.collisions.iter().map(|c| c.targets.len()).sum();

    let mut out = heading(title, color);
    if report.dry_run {
        out.push_str(&format!(
            "\n  would link:      {}",
            report.count(LinkOutcome::Planned)
        ));
    } else {
        out.push_str(&format!(
            "\n  linked:          {}",
            report.count(LinkOutcome::Linked)
        ));
        out.push_str(&format!(
            "\n  replaced:        {}",
            report.count(LinkOutcome::Replaced)
        ));
    }
    out.push_str(&format!(
        "\n  already linked:  {}",
        report.count(LinkOutcome::AlreadyLinked)
    ));
    out.push_str(&format!("\n  missing source:  {}", report.missing.len()));
    out.push_str(&format!(
        "\n  collisions:      {} hashes, {} records",
        report.collisions.len(),
        collided
    ));
    out.push_str(&format!("\n  failed:          {}", report.failures.len()));
    out.push_str(&format!(
        "\n  unreadable:      {} source files",
        report.unreadable_sources.len()
    ));

    push_list(&mut out, "No source file for:", &report.missing, color);
    push_list(
        &mut out,
        "Not linked, hash shared by several source files:",
        report.collisions.iter().map(|c| {
            format!(
                "{}; sources [{}] targets [{}]",
                c.to_error(),
                c.sources
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                c.targets.join(", ")
            )
        }),
        color,
    );
    push_list(
        &mut out,
        "Failed:",
        report
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.path, f.error)),
        color,
    );
    push_list(
        &mut out,
        "Unreadable source files:",
        report.unreadable_sources.iter().map(|e| e.to_string()),
        color,
    );

    out
}

pub fn format_apply_summary_json(report: &ApplyReport) -> Result<String, ReshapeError> {
    let failures: Vec<serde_json::Value> = report
        .failures
        .iter()
        .map(|f| {
            json!({
                "path": f.path,
                "kind": error_kind(&f.error),
                "error": f.error.to_string(),
            })
        })
        .collect();
    let collisions: Vec<serde_json::Value> = report
        .collisions
        .iter()
        .map(|c| {
            let error = c.to_error();
            json!({
                "hash": c.hash,
                "kind": error_kind(&error),
                "error": error.to_string(),
                "sources": c.sources,
                "targets": c.targets,
            })
        })
        .collect();
    let linked: Vec<serde_json::Value> = report
        .linked
        .iter()
        .map(|r| {
            json!({
                "path": r.path,
                "source": r.source,
                "outcome": r.outcome,
            })
        })
        .collect();

    let out = json!({
        "dry_run": report.dry_run,
        "linked": linked,
        "missing": report.missing,
        "collisions": collisions,
        "failures": failures,
        "unreadable_sources": report
            .unreadable_sources
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&out)
        .map_err(|e| ReshapeError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e)))
}

fn error_kind(error: &ReshapeError) -> &'static str {
    match error {
        ReshapeError::HashCollision { .. } => "hash_collision",
        ReshapeError::LinkConflict { .. } => "link_conflict",
        ReshapeError::CrossDeviceLink { .. } => "cross_device_link",
        _ => "io",
    }
}
