//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; the route table dispatches to `gen` and `apply`.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_apply_summary_json, format_apply_summary_text, format_generate_summary_text,
};
pub use route::{CommandIo, RunContext};
