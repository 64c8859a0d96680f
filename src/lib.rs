//! Core library for `audio_rename`.
//!
//! Renames audio files from their embedded tags using a naming template.
//! The core is a template compiler (`template`) and a collision-safe rename
//! engine (`fs_ops`); `batch::run_batch` drives them over a file list and
//! returns a report without printing anything. Config, CLI parsing, scanning
//! and console output are thin layers around that core.

pub mod batch;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod metadata;
pub mod normalize;
pub mod output;
pub mod platform;
pub mod scan;
pub mod shutdown;
pub mod template;

pub use batch::{BatchOptions, BatchReport, FailurePolicy, run_batch};
pub use config::{
    Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor,
    validate_and_normalize,
};
pub use errors::AudioRenameError;
pub use fs_ops::{
    CollisionPolicy, EngineOptions, Occupancy, RenameOutcome, RenamePlan, SkipReason, WorkDirLock,
    acquire_workdir_lock, apply,
};
pub use metadata::{FieldKey, LoftyReader, MetadataReader, MetadataSource, RawTags};
pub use normalize::{TrackMetadata, normalize};
pub use scan::collect_audio_files;
pub use template::{DEFAULT_FORMAT, FormatError, NameTemplate, RenderedPath, render};
