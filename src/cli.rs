//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override config values; unset flags leave the config alone.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::batch::FailurePolicy;
use crate::config::types::{Config, LogLevel};
use crate::fs_ops::CollisionPolicy;
use crate::scan::parse_extension_list;

/// Rename audio files from their embedded tags.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Rename audio files from their metadata using a naming template",
    after_help = "Format keywords: artist album composer title track disc year. \
Use (sep) to start a subdirectory, e.g. \"artist(sep)album(sep)track - title\"."
)]
pub struct Args {
    /// Directory holding the audio files (default: current directory).
    #[arg(short = 'd', long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub directory: Option<PathBuf>,

    /// Naming template, e.g. "artist - album [track] title".
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Place every renamed file under the working directory.
    #[arg(short = 'l', long)]
    pub flatten: bool,

    /// Also rename files in subdirectories.
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Show what would be renamed without touching any file.
    #[arg(short = 't', long = "test", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// What to do when the destination name is taken.
    #[arg(long, value_name = "disambiguate|skip")]
    pub on_collision: Option<CollisionPolicy>,

    /// What to do after a file fails.
    #[arg(long, value_name = "stop|continue")]
    pub on_error: Option<FailurePolicy>,

    /// Comma separated audio extensions to consider.
    #[arg(long, value_name = "EXT,EXT")]
    pub extensions: Option<String>,

    /// Do not ask for confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where the config file is looked up (or AUDIO_RENAME_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a commented template config file, then exit.
    #[arg(long, help = "Write a template config file at the config location and exit")]
    pub init_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.directory {
            cfg.directory = dir.clone();
        }
        if let Some(fmt) = &self.format {
            cfg.format = fmt.clone();
        }
        if self.flatten {
            cfg.flatten = true;
        }
        if self.recursive {
            cfg.recursive = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(policy) = self.on_collision {
            cfg.on_collision = policy;
        }
        if let Some(policy) = self.on_error {
            cfg.on_error = policy;
        }
        if let Some(raw) = &self.extensions {
            let exts = parse_extension_list(raw);
            if !exts.is_empty() {
                cfg.extensions = exts;
            }
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.yes {
            cfg.assume_yes = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
