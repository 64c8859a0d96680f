use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of every transient file this tool creates; scans skip these names.
pub const INTERNAL_PREFIX: &str = ".audio_rename.";

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    dst_dir.join(format!("{INTERNAL_PREFIX}{pid}.{nanos}.{seq}.tmp"))
}

pub(super) fn is_cross_device(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::CrossesDevices {
        return true;
    }
    // Older toolchains report EXDEV / ERROR_NOT_SAME_DEVICE only via the raw code.
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        _ => false,
    }
}

/// True when something (file, directory or dangling symlink) sits at `path`.
pub(super) fn path_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Canonicalize the parent of `path` and re-attach the final component.
/// Falls back to `path` unchanged when the parent does not exist yet.
pub(super) fn normalize_path(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
            dunce::canonicalize(parent)
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// True when `a` and `b` sit in the same directory and their names differ only by case.
pub(super) fn differs_only_by_case(a: &Path, b: &Path) -> bool {
    let (a, b) = (normalize_path(a), normalize_path(b));
    if a.parent() != b.parent() {
        return false;
    }
    match (a.file_name(), b.file_name()) {
        (Some(x), Some(y)) => x != y && x.to_string_lossy().to_lowercase() == y.to_string_lossy().to_lowercase(),
        _ => false,
    }
}

/// True when `a` and `b` name the same existing file.
#[cfg(unix)]
pub(super) fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
pub(super) fn same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

#[cfg(windows)]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn temp_paths_are_unique_and_internal() {
        let dir = tempdir().unwrap();
        let a = unique_temp_path(dir.path());
        let b = unique_temp_path(dir.path());
        assert_ne!(a, b);
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(INTERNAL_PREFIX));
    }

    #[test]
    fn normalize_resolves_parent_spelling() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let plain = dir.path().join("sub").join("a.mp3");
        let dotted = dir.path().join("sub").join(".").join("a.mp3");
        assert_eq!(normalize_path(&plain), normalize_path(&dotted));
        let missing = dir.path().join("nope").join("a.mp3");
        assert_eq!(normalize_path(&missing), missing);
    }

    #[test]
    fn case_only_difference_requires_same_directory() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let a = dir.path().join("song.mp3");
        assert!(differs_only_by_case(&a, &dir.path().join("Song.mp3")));
        assert!(!differs_only_by_case(&a, &a));
        assert!(!differs_only_by_case(&a, &dir.path().join("01.mp3")));
        assert!(!differs_only_by_case(&a, &dir.path().join("sub").join("Song.mp3")));
    }

    #[cfg(unix)]
    #[test]
    fn exdev_is_cross_device() {
        assert!(is_cross_device(&io::Error::from_raw_os_error(libc::EXDEV)));
        assert!(!is_cross_device(&io::Error::from_raw_os_error(libc::EACCES)));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_occupied() {
        let dir = tempdir().unwrap();
        let link = dir.path().join("link.mp3");
        std::os::unix::fs::symlink(dir.path().join("missing"), &link).unwrap();
        assert!(!link.exists());
        assert!(path_occupied(&link));
    }
}
