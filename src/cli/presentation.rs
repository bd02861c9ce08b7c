//! CLI presentation: text and json formatters per command.

mod apply;
mod generate;
mod shared;

pub use apply::{format_apply_summary_json, format_apply_summary_text};
pub use generate::format_generate_summary_text;
