//! Rename engine.
//! Places one file at its rendered destination, honouring the collision policy.
//! Attempts an atomic rename; only a cross-filesystem failure falls back to copy+remove.
//! Never overwrites: every path that is taken on disk or claimed earlier in the
//! batch counts as occupied.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::atomic::try_atomic_move;
use super::copy::copy_then_remove;
use super::duplicate::{CollisionPolicy, Disambiguation, Occupancy, disambiguate};
use super::helpers::fs_error;
use super::util;
use crate::errors::AudioRenameError;
use crate::template::RenderedPath;

/// Engine settings shared by every file in a batch.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Root for destinations when `flatten` is set.
    pub working_dir: PathBuf,
    /// Place results under `working_dir` instead of next to each source.
    pub flatten: bool,
    /// Decide every outcome without touching the filesystem.
    pub dry_run: bool,
    pub collision: CollisionPolicy,
}

impl EngineOptions {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            flatten: false,
            dry_run: false,
            collision: CollisionPolicy::default(),
        }
    }
}

/// One file and the path its metadata rendered to.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub source: PathBuf,
    pub rendered: RenderedPath,
}

impl RenamePlan {
    pub fn new(source: impl Into<PathBuf>, rendered: RenderedPath) -> Self {
        Self {
            source: source.into(),
            rendered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file already carries its rendered name.
    Unchanged,
    /// The destination is taken and the policy says skip.
    Collision(PathBuf),
}

#[derive(Debug)]
pub enum RenameOutcome {
    Renamed {
        source: PathBuf,
        destination: PathBuf,
    },
    Skipped {
        source: PathBuf,
        reason: SkipReason,
    },
    Failed {
        source: PathBuf,
        error: AudioRenameError,
    },
}

impl RenameOutcome {
    pub fn source(&self) -> &Path {
        match self {
            RenameOutcome::Renamed { source, .. }
            | RenameOutcome::Skipped { source, .. }
            | RenameOutcome::Failed { source, .. } => source,
        }
    }

    pub fn destination(&self) -> Option<&Path> {
        match self {
            RenameOutcome::Renamed { destination, .. } => Some(destination),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RenameOutcome::Failed { .. })
    }

    fn failed(source: &Path, error: AudioRenameError) -> Self {
        RenameOutcome::Failed {
            source: source.to_path_buf(),
            error,
        }
    }

    fn skipped(source: &Path, reason: SkipReason) -> Self {
        RenameOutcome::Skipped {
            source: source.to_path_buf(),
            reason,
        }
    }
}

/// Directory the rendered path is resolved against.
pub fn destination_root(source: &Path, opts: &EngineOptions) -> PathBuf {
    if opts.flatten {
        return opts.working_dir.clone();
    }
    match source.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Decide and (unless dry-run) perform the rename for one file.
pub fn apply(plan: &RenamePlan, opts: &EngineOptions, occupancy: &mut Occupancy) -> RenameOutcome {
    let src = plan.source.as_path();
    let dest_dir = destination_root(src, opts).join(plan.rendered.relative_dir());
    let mut dest = dest_dir.join(plan.rendered.file_name());

    if util::normalize_path(&dest) == util::normalize_path(src) {
        debug!(src = %src.display(), "already named correctly");
        return RenameOutcome::skipped(src, SkipReason::Unchanged);
    }

    if occupancy.is_occupied(&dest) {
        if !occupancy.is_claimed(&dest) && util::differs_only_by_case(src, &dest) && util::same_file(src, &dest) {
            // Same file under another spelling (case-insensitive filesystem).
            debug!(src = %src.display(), dest = %dest.display(), "case-only rename");
        } else {
            match opts.collision {
                CollisionPolicy::SkipOnCollision => {
                    info!(src = %src.display(), dest = %dest.display(), "destination exists; skipping");
                    return RenameOutcome::skipped(src, SkipReason::Collision(dest));
                }
                CollisionPolicy::AutoDisambiguate => {
                    match disambiguate(&dest_dir, &plan.rendered, src, occupancy) {
                        Disambiguation::Free(p) => dest = p,
                        Disambiguation::IsSource(_) => {
                            debug!(src = %src.display(), "already carries a disambiguated name");
                            return RenameOutcome::skipped(src, SkipReason::Unchanged);
                        }
                        Disambiguation::Exhausted => {
                            return RenameOutcome::failed(
                                src,
                                AudioRenameError::DisambiguationExhausted(dest),
                            );
                        }
                    }
                }
            }
        }
    }

    if opts.dry_run {
        if let Some(blocker) = blocking_ancestor(&dest_dir, occupancy) {
            warn!(src = %src.display(), blocker = %blocker.display(), "dry-run: destination directory cannot be created");
            return RenameOutcome::failed(
                src,
                AudioRenameError::Filesystem {
                    op: "create destination directory",
                    path: dest_dir,
                    message: format!("'{}' exists and is not a directory", blocker.display()),
                },
            );
        }
        info!(src = %src.display(), dest = %dest.display(), "dry-run: would rename");
        occupancy.record_move(src, &dest);
        return RenameOutcome::Renamed {
            source: src.to_path_buf(),
            destination: dest,
        };
    }

    if let Err(e) = fs::create_dir_all(&dest_dir) {
        return RenameOutcome::failed(src, fs_error("create destination directory", &dest_dir)(e));
    }

    if let Err(e) = move_file(src, &dest) {
        warn!(src = %src.display(), dest = %dest.display(), error = %e, "rename failed");
        return RenameOutcome::failed(src, e);
    }

    info!(src = %src.display(), dest = %dest.display(), "renamed");
    occupancy.record_move(src, &dest);
    RenameOutcome::Renamed {
        source: src.to_path_buf(),
        destination: dest,
    }
}

/// Nearest ancestor of `dir` (itself included) that would stop `create_dir_all`.
fn blocking_ancestor(dir: &Path, occupancy: &Occupancy) -> Option<PathBuf> {
    for anc in dir.ancestors() {
        if anc.as_os_str().is_empty() {
            break;
        }
        if occupancy.is_claimed(anc) {
            return Some(anc.to_path_buf());
        }
        if occupancy.is_vacated(anc) {
            continue;
        }
        match fs::metadata(anc) {
            Ok(meta) if meta.is_dir() => return None,
            Ok(_) => return Some(anc.to_path_buf()),
            Err(_) => continue,
        }
    }
    None
}

fn move_file(src: &Path, dest: &Path) -> Result<(), AudioRenameError> {
    match try_atomic_move(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if util::is_cross_device(&e) => {
            warn!(src = %src.display(), dest = %dest.display(), "cross-filesystem rename; copying instead");
            copy_then_remove(src, dest)
        }
        Err(e) => Err(fs_error("rename", src)(e)),
    }
}
