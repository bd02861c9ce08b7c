//! CLI parse: clap types for reshape. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reshape CLI - reorganize a directory tree by content hash
#[derive(Parser, Debug)]
#[command(name = "reshape")]
#[command(about = "Reorganize a directory tree by content hash using hardlinks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable logging (the end-of-run summary is still printed)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hash every file under ROOT and print the manifest as JSON
    Gen {
        /// Directory to scan
        root: PathBuf,
        /// Write the manifest to this file instead of standard output
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
        /// Leave files that share a hash with another file out of the manifest
        #[arg(long)]
        omit_collisions: bool,
        /// Hashing worker threads
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Hardlink files from ROOT into the layout described by a manifest
    Apply {
        /// Directory rescanned for file content
        root: PathBuf,
        /// Directory manifest paths are created under (default: current directory)
        #[arg(long, short)]
        target: Option<PathBuf>,
        /// Read the manifest from this file instead of standard input
        #[arg(long, short)]
        manifest: Option<PathBuf>,
        /// Replace a different file found at a target path
        #[arg(long)]
        replace: bool,
        /// Report what would be linked without changing anything
        #[arg(long)]
        dry_run: bool,
        /// Summary format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Hashing worker threads
        #[arg(long)]
        threads: Option<usize>,
    },
}
