//! Application orchestrator.
//! Loads/merges config, initializes logging, validates the template and directory,
//! asks for confirmation, runs the batch and prints the report.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, error, info};

use audio_rename::cli::Args;
use audio_rename::config::{CONFIG_ENV, LoadResult, default_config_path, init_config, load_config};
use audio_rename::output as out;
use audio_rename::{
    AudioRenameError, Config, LoftyReader, acquire_workdir_lock, collect_audio_files, run_batch, shutdown,
    validate_and_normalize,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config / --init-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(ExitCode::SUCCESS);
    }
    if args.init_config {
        let path = init_config()?;
        out::print_success(&format!("A template config was written to: {}", path.display()));
        out::print_info("Edit it, then re-run. CLI flags still override its values.");
        return Ok(ExitCode::SUCCESS);
    }

    // Config file (if any), then CLI overrides.
    let mut cfg = match load_config()? {
        LoadResult::Loaded(cfg, path) => {
            debug!(path = %path.display(), "config file loaded");
            cfg
        }
        LoadResult::Missing(cfg, _) => cfg,
    };
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
    })?;
    let guard_slot = Arc::new(Mutex::new(guard));

    debug!(?args, "starting audio_rename");

    let result = run_batch_with_config(&mut cfg, &guard_slot);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn run_batch_with_config(
    cfg: &mut Config,
    guard_slot: &Arc<Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>>,
) -> Result<ExitCode> {
    let template = validate_and_normalize(cfg)?;
    let files = collect_audio_files(&cfg.directory, cfg.recursive, &cfg.extensions)?;
    if files.is_empty() {
        out::print_info(&format!(
            "No audio files ({}) found in {}",
            cfg.extensions.join(", "),
            cfg.directory.display()
        ));
        return Ok(ExitCode::SUCCESS);
    }

    if !cfg.assume_yes {
        print_plan(cfg, files.len());
        let stdin = io::stdin();
        if !confirm(&mut stdin.lock(), &mut io::stdout())? {
            out::print_info("Aborted; no files were touched.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    // Guard needs to be dropped on SIGINT to flush logs; the batch stops between files.
    {
        let guard_slot = Arc::clone(guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("failed to install signal handler")?;
    }

    let _lock = if cfg.dry_run {
        None
    } else {
        Some(acquire_workdir_lock(&cfg.directory)?)
    };

    let started = Instant::now();
    let report = run_batch(&cfg.batch_options(template), &files, &LoftyReader);
    out::print_report(&report, &cfg.directory, cfg.dry_run, started.elapsed());

    if report.interrupted {
        let err = AudioRenameError::Interrupted;
        error!(code = err.code(), kind = err.kind(), "batch interrupted");
        return Ok(exit_code(err.code()));
    }
    if report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    info!(directory = %cfg.directory.display(), "batch completed");
    Ok(ExitCode::SUCCESS)
}

/// Map a process code onto ExitCode (codes outside u8 collapse to 1).
pub fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
}

fn print_config_location() {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}",
            std::path::Path::new(&p).display()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default audio_rename config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

fn print_plan(cfg: &Config, count: usize) {
    let mode = if cfg.dry_run { "dry run (no files will be changed)" } else { "rename" };
    out::print_user(&format!("Directory:    {}", cfg.directory.display()));
    out::print_user(&format!("Format:       {}", cfg.format));
    out::print_user(&format!("Files:        {count}{}", if cfg.recursive { " (recursive)" } else { "" }));
    out::print_user(&format!(
        "Placement:    {}",
        if cfg.flatten { "under the working directory" } else { "next to each file" }
    ));
    out::print_user(&format!("On collision: {}", cfg.on_collision));
    out::print_user(&format!("On error:     {}", cfg.on_error));
    out::print_user(&format!("Mode:         {mode}"));
}

/// Ask the operator to type `ok`; anything else (or EOF) declines.
fn confirm(input: &mut impl BufRead, prompt_out: &mut impl Write) -> Result<bool> {
    write!(prompt_out, "Type 'ok' to continue: ")?;
    prompt_out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("read confirmation")?;
    Ok(line.trim().eq_ignore_ascii_case("ok"))
}
