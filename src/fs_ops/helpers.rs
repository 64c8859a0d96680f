//! I/O helper utilities.
//!
//! Adapters that enrich io::Error with the failed operation, the path and a
//! platform-aware hint, producing the typed `AudioRenameError::Filesystem`.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(fs_error("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::AudioRenameError;

/// Human-friendly message with a hint derived from the OS error code or kind.
pub(crate) fn describe_io_error(e: &io::Error) -> String {
    let mut msg = e.to_string();

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (cross-filesystem; a plain rename is not possible)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy; ensure no other process is using the file)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; it may have been moved by another process)");
                }
                libc::EEXIST => {
                    msg.push_str(" (already exists)");
                }
                libc::ENOSPC => {
                    msg.push_str(" (insufficient space on device)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (file name or path too long; shorten the naming format)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"),
                17 => msg.push_str(" (not same device; cross-filesystem move)"),
                32 => msg.push_str(" (sharing violation; file is in use)"),
                2 | 3 => msg.push_str(" (path not found)"),
                80 | 183 => msg.push_str(" (already exists)"),
                112 => msg.push_str(" (insufficient disk space)"),
                206 => msg.push_str(" (file name or path too long; shorten the naming format)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {code}]"));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => msg.push_str(" (permission denied)"),
            io::ErrorKind::NotFound => msg.push_str(" (path not found)"),
            io::ErrorKind::AlreadyExists => msg.push_str(" (already exists)"),
            _ => {}
        }
    }

    msg
}

/// Closure for `.map_err(...)` turning io::Error into a Filesystem error.
pub(crate) fn fs_error<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> AudioRenameError + 'a {
    move |e: io::Error| AudioRenameError::Filesystem {
        op,
        path: path.to_path_buf(),
        message: describe_io_error(&e),
    }
}
