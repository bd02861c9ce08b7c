//! CLI route: single route table and run context. Dispatches to the `gen` and
//! `apply` entry points and to presentation.

use crate::apply::{run_apply, ApplyRequest};
use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_apply_summary_json, format_apply_summary_text, format_generate_summary_text,
};
use crate::config::{ConfigLoader, ReshapeConfig};
use crate::error::ReshapeError;
use crate::generate::{run_generate, GenerateRequest};
use crate::manifest::Manifest;
use crate::tree::hasher::Xxh64Hasher;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Standard streams for one command. The binary passes the process streams;
/// tests pass buffers.
pub struct CommandIo<'a> {
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
    /// Colorize the summary on stderr
    pub color: bool,
}

/// Runtime context for CLI execution: loaded configuration and the directory
/// relative paths are resolved from.
pub struct RunContext {
    config: ReshapeConfig,
    working_dir: PathBuf,
}

impl RunContext {
    /// Load configuration for a run in `working_dir`, or from `config_path` when given.
    pub fn new(working_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ReshapeError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&working_dir)?,
        };
        Ok(Self::with_config(working_dir, config))
    }

    pub fn with_config(working_dir: PathBuf, config: ReshapeConfig) -> Self {
        Self {
            config,
            working_dir,
        }
    }

    pub fn config(&self) -> &ReshapeConfig {
        &self.config
    }

    /// Execute a command. Fatal errors are returned; everything recoverable
    /// ends up in the summary written to `io.stderr`.
    pub fn execute(&self, command: &Commands, io: CommandIo<'_>) -> Result<(), ReshapeError> {
        let started = Instant::now();
        let result = match command {
            Commands::Gen {
                root,
                output,
                compact,
                omit_collisions,
                threads,
            } => self.handle_gen(
                root,
                output.as_deref(),
                !compact,
                *omit_collisions,
                *threads,
                io,
            ),
            Commands::Apply {
                root,
                target,
                manifest,
                replace,
                dry_run,
                format,
                threads,
            } => self.handle_apply(
                root,
                target.as_deref(),
                manifest.as_deref(),
                *replace,
                *dry_run,
                format,
                *threads,
                io,
            ),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    fn scan_config(&self, threads: Option<usize>) -> crate::config::ScanConfig {
        let mut scan = self.config.scan.clone();
        if threads.is_some() {
            scan.threads = threads;
        }
        scan
    }

    fn handle_gen(
        &self,
        root: &Path,
        output: Option<&Path>,
        pretty: bool,
        omit_collisions: bool,
        threads: Option<usize>,
        io: CommandIo<'_>,
    ) -> Result<(), ReshapeError> {
        let request = GenerateRequest {
            root: self.resolve(root),
            omit_collisions,
        };
        let result = run_generate(&request, &Xxh64Hasher, &self.scan_config(threads))?;

        match output {
            Some(path) => {
                let file = File::create(self.resolve(path))?;
                result.manifest.write_to(BufWriter::new(file), pretty)?;
            }
            None => result.manifest.write_to(&mut *io.stdout, pretty)?,
        }

        writeln!(
            io.stderr,
            "{}",
            format_generate_summary_text(&result, root, io.color)
        )?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_apply(
        &self,
        root: &Path,
        target: Option<&Path>,
        manifest_path: Option<&Path>,
        replace: bool,
        dry_run: bool,
        format: &str,
        threads: Option<usize>,
        io: CommandIo<'_>,
    ) -> Result<(), ReshapeError> {
        if format != "text" && format != "json" {
            return Err(ReshapeError::ConfigError(format!(
                "Invalid summary format: {} (must be 'text' or 'json')",
                format
            )));
        }

        let manifest = match manifest_path {
            Some(path) => Manifest::read_from(BufReader::new(File::open(self.resolve(path))?))?,
            None => Manifest::read_from(&mut *io.stdin)?,
        };

        let target_root = target
            .map(Path::to_path_buf)
            .or_else(|| self.config.apply.target.clone())
            .map(|t| self.resolve(&t))
            .unwrap_or_else(|| self.working_dir.clone());

        let request = ApplyRequest {
            source_root: self.resolve(root),
            target_root,
            replace_conflicts: replace || self.config.apply.replace_conflicts,
            dry_run,
        };
        let report = run_apply(&request, &manifest, &Xxh64Hasher, &self.scan_config(threads))?;

        let summary = if format == "json" {
            format_apply_summary_json(&report)?
        } else {
            format_apply_summary_text(&report, io.color)
        };
        writeln!(io.stderr, "{}", summary)?;
        Ok(())
    }
}
