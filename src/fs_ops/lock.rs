//! Advisory working-directory lock.
//! Holds `.audio_rename.lock` inside the working directory for the length of a
//! real (non dry-run) batch so two renamers never race over the same tree.
//!
//! Notes:
//! - fs2 maps to flock on Unix and LockFileEx on Windows.
//! - Acquisition never blocks: a held lock is reported as `Locked`.
//! - The guard unlocks and removes the lock file on drop.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::helpers::fs_error;
use super::util::INTERNAL_PREFIX;
use crate::errors::AudioRenameError;

/// RAII guard held while the working-directory lock is active.
#[derive(Debug)]
pub struct WorkDirLock {
    file: File,
    path: PathBuf,
}

impl WorkDirLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkDirLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn lock_file_path(dir: &Path) -> PathBuf {
    dir.join(format!("{INTERNAL_PREFIX}lock"))
}

/// Try to lock `dir` without waiting.
pub fn acquire_workdir_lock(dir: &Path) -> Result<WorkDirLock, AudioRenameError> {
    let path = lock_file_path(dir);

    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let file = opts.open(&path).map_err(fs_error("open lock file", &path))?;

    match FileExt::try_lock_exclusive(&file) {
        Ok(()) => {
            trace!(path = %path.display(), "work directory lock acquired");
            Ok(WorkDirLock { file, path })
        }
        Err(e) if is_contended(&e) => {
            trace!(path = %path.display(), "work directory lock held elsewhere");
            Err(AudioRenameError::Locked(dir.to_path_buf()))
        }
        Err(e) => Err(fs_error("lock work directory", &path)(e)),
    }
}

fn is_contended(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::WouldBlock
        || (e.raw_os_error().is_some() && e.raw_os_error() == fs2::lock_contended_error().raw_os_error())
}
