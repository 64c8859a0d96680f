//! File attribute preservation for the copy fallback.
//! - Copies timestamps (atime, mtime) and, on Unix, the permission bits.
//! - Windows mirrors the readonly attribute.
//! - Extended attributes are copied when the `xattrs` feature is enabled.
//!
//! Best-effort: failures are logged and ignored; the file contents are what matter.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Apply `src_meta`'s timestamps and permissions to `dest`.
pub(super) fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) {
    let at = FileTime::from_last_access_time(src_meta);
    let mt = FileTime::from_last_modification_time(src_meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(mode)) {
            warn!(path = %dest.display(), mode = format!("{:o}", mode), error = %e, "failed to set permissions on destination");
        }
    }

    #[cfg(windows)]
    {
        let ro = src_meta.permissions().readonly();
        if let Ok(meta) = fs::metadata(dest) {
            let mut perms = meta.permissions();
            perms.set_readonly(ro);
            if let Err(e) = fs::set_permissions(dest, perms) {
                warn!(path = %dest.display(), readonly = ro, error = %e, "failed to set readonly attribute on destination");
            }
        }
    }
}

/// Copy extended attributes (no-op without the `xattrs` feature).
pub(super) fn preserve_xattrs(src: &Path, dest: &Path) {
    #[cfg(feature = "xattrs")]
    {
        match xattr::list(src) {
            Ok(names) => {
                for name in names {
                    let value = match xattr::get(src, &name) {
                        Ok(v) => v.unwrap_or_default(),
                        Err(e) => {
                            warn!(src = %src.display(), xattr = %name.to_string_lossy(), error = %e, "failed to read xattr");
                            continue;
                        }
                    };
                    if let Err(e) = xattr::set(dest, &name, &value) {
                        warn!(dest = %dest.display(), xattr = %name.to_string_lossy(), error = %e, "failed to set xattr");
                    }
                }
            }
            Err(e) => {
                warn!(src = %src.display(), error = %e, "failed to list xattrs; continuing");
            }
        }
    }
    #[cfg(not(feature = "xattrs"))]
    {
        let _ = (src, dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mtime_is_copied() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.ogg");
        let dst = dir.path().join("b.ogg");
        fs::write(&src, b"a").unwrap();
        fs::write(&dst, b"a").unwrap();
        let ts = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&src, ts).unwrap();

        preserve_metadata(&dst, &fs::metadata(&src).unwrap());
        let got = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
        assert_eq!(got.unix_seconds(), ts.unix_seconds());
    }

    #[cfg(unix)]
    #[test]
    fn mode_is_copied() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.mp3");
        let dst = dir.path().join("b.mp3");
        fs::write(&src, b"a").unwrap();
        fs::write(&dst, b"a").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o640)).unwrap();

        preserve_metadata(&dst, &fs::metadata(&src).unwrap());
        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
