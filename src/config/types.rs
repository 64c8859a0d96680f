//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::batch::{BatchOptions, FailurePolicy};
use crate::fs_ops::{CollisionPolicy, EngineOptions};
use crate::scan::default_extensions;
use crate::template::{DEFAULT_FORMAT, NameTemplate};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory scanned for audio files
    pub directory: PathBuf,
    /// Naming template (compiled during validation)
    pub format: String,
    /// Put every result under `directory` instead of next to its source
    pub flatten: bool,
    /// Descend into subdirectories when scanning
    pub recursive: bool,
    /// Report what would happen without renaming anything
    pub dry_run: bool,
    pub on_collision: CollisionPolicy,
    pub on_error: FailurePolicy,
    /// Lowercase extensions (no dot) considered audio
    pub extensions: Vec<String>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Skip the interactive confirmation
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            format: DEFAULT_FORMAT.to_string(),
            flatten: false,
            recursive: false,
            dry_run: false,
            on_collision: CollisionPolicy::default(),
            on_error: FailurePolicy::default(),
            extensions: default_extensions(),
            log_level: LogLevel::Normal,
            log_file: None,
            assume_yes: false,
        }
    }
}

impl Config {
    /// Construct a Config for `directory` and `format`; other fields use defaults.
    pub fn new(directory: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            format: format.into(),
            ..Default::default()
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            working_dir: self.directory.clone(),
            flatten: self.flatten,
            dry_run: self.dry_run,
            collision: self.on_collision,
        }
    }

    /// Batch settings for an already compiled template.
    pub fn batch_options(&self, template: NameTemplate) -> BatchOptions {
        BatchOptions {
            engine: self.engine_options(),
            template,
            failure: self.on_error,
        }
    }
}
