//! Reshape CLI Binary
//!
//! `reshape gen <root> > manifest.json`, edit the paths, then
//! `reshape apply <root> < manifest.json` to hardlink the new layout.

use clap::Parser;
use reshape::cli::{Cli, CommandIo, RunContext};
use reshape::config::ConfigLoader;
use reshape::logging::{init_logging, output_uses_file, resolve_log_file_path, LoggingConfig};
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot determine the current directory: {}", e);
            process::exit(1);
        }
    };

    // Build logging config from CLI args, env vars, and config file
    let mut logging_config = build_logging_config(&cli, &working_dir);
    if !std::io::stderr().is_terminal() {
        logging_config.color = false;
    }

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let context = match RunContext::new(working_dir, cli.config.clone()) {
        Ok(ctx) => {
            debug!("Configuration loaded");
            ctx
        }
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", reshape::cli::map_error(&e));
            process::exit(1);
        }
    };

    // Unlocked handles: the tracing layer writes to stderr from the hashing
    // workers while the command runs.
    let mut stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let color = logging_config.color;
    let io = CommandIo {
        stdin: &mut stdin,
        stdout: &mut stdout,
        stderr: &mut stderr,
        color,
    };

    if let Err(e) = context.execute(&cli.command, io) {
        error!("Command failed: {}", e);
        eprintln!("{}", reshape::cli::map_error(&e));
        process::exit(1);
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, working_dir: &Path) -> LoggingConfig {
    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(working_dir)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // Keep verbose output visible in the terminal; an explicit
        // --log-output value still takes precedence below.
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    if config.enabled && output_uses_file(&config.output) {
        if let Ok(path) = resolve_log_file_path(cli.log_file.clone(), config.file.clone()) {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
