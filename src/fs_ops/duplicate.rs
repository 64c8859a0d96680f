//! Collision handling.
//!
//! Policy:
//! - AutoDisambiguate: pick the first free name among `stem_(1).ext`, `stem_(2).ext`, ...
//! - SkipOnCollision: leave the file alone and report the occupied destination.
//!
//! Overwriting is never an option.
//!
//! `Occupancy` layers the moves already decided in this batch over the real
//! filesystem. A dry run consults the same overlay, so it predicts exactly the
//! names a real run picks (e.g. two files rendering to the same name).

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::trace;

use super::util;
use crate::template::RenderedPath;

/// Upper bound on `_(n)` probes for one file.
pub const MAX_PROBES: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Append `_(n)` before the extension until the name is free.
    #[default]
    AutoDisambiguate,
    /// Report the collision and leave the source untouched.
    SkipOnCollision,
}

impl CollisionPolicy {
    /// Parse common spellings (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disambiguate" | "auto" | "rename" | "suffix" => Some(CollisionPolicy::AutoDisambiguate),
            "skip" => Some(CollisionPolicy::SkipOnCollision),
            _ => None,
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CollisionPolicy::AutoDisambiguate => "disambiguate",
            CollisionPolicy::SkipOnCollision => "skip",
        })
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid collision policy: '{s}' (expected disambiguate or skip)"))
    }
}

/// Filesystem state as seen by the current batch.
#[derive(Debug, Default)]
pub struct Occupancy {
    claimed: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `path` is taken on disk or by an earlier move in this batch.
    pub fn is_occupied(&self, path: &Path) -> bool {
        if self.claimed.contains(path) {
            return true;
        }
        if self.vacated.contains(path) {
            return false;
        }
        util::path_occupied(path)
    }

    /// True if an earlier move in this batch left `path` empty.
    pub fn is_vacated(&self, path: &Path) -> bool {
        self.vacated.contains(path)
    }

    /// True if an earlier move in this batch (rather than the disk) owns `path`.
    pub fn is_claimed(&self, path: &Path) -> bool {
        self.claimed.contains(path)
    }

    pub fn record_move(&mut self, from: &Path, to: &Path) {
        self.claimed.remove(from);
        self.vacated.insert(from.to_path_buf());
        self.vacated.remove(to);
        self.claimed.insert(to.to_path_buf());
    }
}

/// Result of probing for a disambiguated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disambiguation {
    /// First unused `_(n)` name.
    Free(PathBuf),
    /// The probe reached the source itself: the file already carries this name.
    IsSource(PathBuf),
    /// Every probe up to MAX_PROBES was taken.
    Exhausted,
}

/// Probe `dir/stem_(n).ext` for n = 1.. until a free name (or the source) is found.
pub fn disambiguate(
    dir: &Path,
    rendered: &RenderedPath,
    source: &Path,
    occupancy: &Occupancy,
) -> Disambiguation {
    let source_norm = util::normalize_path(source);
    for n in 1..=MAX_PROBES {
        let candidate = dir.join(rendered.file_name_with_suffix(&format!("_({n})")));
        if util::normalize_path(&candidate) == source_norm {
            return Disambiguation::IsSource(candidate);
        }
        if !occupancy.is_occupied(&candidate) {
            return Disambiguation::Free(candidate);
        }
        if n == 3 {
            trace!(dir = %dir.display(), stem = rendered.stem(), "duplicate: multiple collisions, still searching");
        }
    }
    Disambiguation::Exhausted
}
