//! Filesystem operations: modularized.

mod atomic;
mod copy;
mod duplicate;
mod helpers;
mod io_copy;
mod lock;
mod preserve;
mod rename;
mod util;

pub use duplicate::{CollisionPolicy, Disambiguation, MAX_PROBES, Occupancy, disambiguate};
pub use lock::{WorkDirLock, acquire_workdir_lock, lock_file_path};
pub use rename::{EngineOptions, RenameOutcome, RenamePlan, SkipReason, apply, destination_root};
pub use util::INTERNAL_PREFIX;
