//! Batch runner.
//! Drives read -> normalize -> render -> rename over a file list, one file at a time.
//!
//! Notes:
//! - The template is compiled once by the caller and shared read-only.
//! - A single `Occupancy` overlay spans the batch so dry runs and real runs agree.
//! - The shutdown flag is checked between files; a started file always finishes.
//! - No console output here: callers render the returned `BatchReport`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::fs_ops::{EngineOptions, Occupancy, RenameOutcome, RenamePlan, SkipReason, apply};
use crate::metadata::MetadataReader;
use crate::normalize::normalize;
use crate::shutdown;
use crate::template::{NameTemplate, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failed file; the rest are reported as not attempted.
    StopOnFirstError,
    /// Keep going and report every failure at the end.
    #[default]
    ContinueAndReport,
}

impl FailurePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stop" | "abort" => Some(FailurePolicy::StopOnFirstError),
            "continue" | "report" => Some(FailurePolicy::ContinueAndReport),
            _ => None,
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailurePolicy::StopOnFirstError => "stop",
            FailurePolicy::ContinueAndReport => "continue",
        })
    }
}

impl FromStr for FailurePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid failure policy: '{s}' (expected stop or continue)"))
    }
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub engine: EngineOptions,
    pub template: NameTemplate,
    pub failure: FailurePolicy,
}

/// Everything a batch did, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RenameOutcome>,
    /// Files left alone because the batch stopped early.
    pub not_attempted: Vec<PathBuf>,
    /// The batch stopped because shutdown was requested.
    pub interrupted: bool,
}

impl BatchReport {
    pub fn renamed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RenameOutcome::Renamed { .. }))
            .count()
    }

    pub fn unchanged(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    RenameOutcome::Skipped {
                        reason: SkipReason::Unchanged,
                        ..
                    }
                )
            })
            .count()
    }

    pub fn collisions(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    RenameOutcome::Skipped {
                        reason: SkipReason::Collision(_),
                        ..
                    }
                )
            })
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(RenameOutcome::is_failed)
    }
}

fn plan_for(path: &Path, template: &NameTemplate, reader: &dyn MetadataReader) -> Result<RenamePlan, RenameOutcome> {
    let raw = reader.read(path).map_err(|error| RenameOutcome::Failed {
        source: path.to_path_buf(),
        error,
    })?;
    let meta = normalize(&raw);
    let ext = path.extension().unwrap_or_default();
    Ok(RenamePlan::new(path, render(template, &meta, ext)))
}

/// Process `files` in order and collect one outcome per attempted file.
pub fn run_batch(opts: &BatchOptions, files: &[PathBuf], reader: &dyn MetadataReader) -> BatchReport {
    let mut report = BatchReport::default();
    let mut occupancy = Occupancy::new();
    info!(
        files = files.len(),
        dry_run = opts.engine.dry_run,
        flatten = opts.engine.flatten,
        collision = %opts.engine.collision,
        on_error = %opts.failure,
        format = %opts.template,
        "batch start"
    );

    for (idx, path) in files.iter().enumerate() {
        if shutdown::is_requested() {
            warn!(remaining = files.len() - idx, "shutdown requested; stopping batch");
            report.interrupted = true;
            report.not_attempted.extend_from_slice(&files[idx..]);
            break;
        }

        let outcome = match plan_for(path, &opts.template, reader) {
            Ok(plan) => {
                debug!(src = %path.display(), rendered = %plan.rendered.to_path().display(), "planned");
                apply(&plan, &opts.engine, &mut occupancy)
            }
            Err(failed) => failed,
        };

        let stop = outcome.is_failed() && opts.failure == FailurePolicy::StopOnFirstError;
        if let RenameOutcome::Failed { source, error } = &outcome {
            warn!(src = %source.display(), kind = error.kind(), error = %error, "file failed");
        }
        report.outcomes.push(outcome);

        if stop {
            report.not_attempted.extend_from_slice(&files[idx + 1..]);
            break;
        }
    }

    info!(
        renamed = report.renamed(),
        unchanged = report.unchanged(),
        collisions = report.collisions(),
        failed = report.failed(),
        not_attempted = report.not_attempted.len(),
        "batch done"
    );
    report
}
