//! Plain rename helper.
//! - Performs a same-filesystem rename and returns the raw io::Error so callers
//!   can tell a cross-device failure from anything else.
//! - Never removes an existing destination first; callers guarantee the target is free.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

pub(super) fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // A failed directory sync must not turn a completed rename into a failure.
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
