//! Cross-device fallback: copy, then delete the original.
//!
//! - Copies to a hidden temp file in the destination directory (never clobbers)
//! - Carries timestamps, permissions and xattrs over to the copy
//! - Renames temp -> dest after re-checking that dest is still free
//! - Removes the source; if that fails the copy is removed again so the
//!   filesystem is left as it was found

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::atomic::try_atomic_move;
use super::helpers::fs_error;
use super::preserve::{preserve_metadata, preserve_xattrs};
use super::{io_copy, util};
use crate::errors::AudioRenameError;

/// Move `src` to `dest` across filesystems.
pub(super) fn copy_then_remove(src: &Path, dest: &Path) -> Result<(), AudioRenameError> {
    let dest_dir = dest.parent().ok_or_else(|| AudioRenameError::Filesystem {
        op: "resolve destination directory",
        path: dest.to_path_buf(),
        message: "destination has no parent".into(),
    })?;

    let src_meta = fs::metadata(src).map_err(fs_error("stat source", src))?;
    let tmp = util::unique_temp_path(dest_dir);

    let copied = io_copy::copy_streaming(src, &tmp).map_err(fs_error("copy to temporary file", &tmp));
    match copied {
        Ok(bytes) if bytes == src_meta.len() => {}
        Ok(bytes) => {
            let _ = fs::remove_file(&tmp);
            return Err(AudioRenameError::Filesystem {
                op: "copy to temporary file",
                path: src.to_path_buf(),
                message: format!(
                    "source changed during copy (expected {} bytes, copied {bytes})",
                    src_meta.len()
                ),
            });
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    }

    preserve_metadata(&tmp, &src_meta);
    preserve_xattrs(src, &tmp);

    if util::path_occupied(dest) {
        let _ = fs::remove_file(&tmp);
        return Err(AudioRenameError::Collision(dest.to_path_buf()));
    }
    if let Err(e) = try_atomic_move(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(fs_error("rename temporary file into place", dest)(e));
    }
    debug!(src = %src.display(), dest = %dest.display(), "copied across filesystems");

    if let Err(e) = fs::remove_file(src) {
        warn!(src = %src.display(), error = %e, "could not remove original after copy; rolling back");
        let _ = fs::remove_file(dest);
        return Err(fs_error("remove original file", src)(e));
    }
    Ok(())
}
