//! Audio file enumeration.
//! - Lists regular files directly in `dir`, or the whole tree with `recursive`.
//! - Extension match is case-insensitive; hidden entries (and this tool's own
//!   `.audio_rename.*` files) are skipped, hidden directories are not descended.
//! - Symlinks are not followed and not returned.
//!
//! Output is sorted so batches are deterministic.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::AudioRenameError;

pub const DEFAULT_EXTENSIONS: [&str; 6] = ["mp3", "ogg", "flac", "m4a", "opus", "wav"];

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

/// Split a comma/whitespace separated list, dropping leading dots and case.
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn has_wanted_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|want| want.eq_ignore_ascii_case(e)))
}

/// Collect audio files under `dir`.
pub fn collect_audio_files(
    dir: &Path,
    recursive: bool,
    extensions: &[String],
) -> Result<Vec<PathBuf>, AudioRenameError> {
    if !dir.is_dir() {
        return Err(AudioRenameError::DirectoryInvalid(dir.to_path_buf()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(0)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|res| match res {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(DirEntry::into_path)
        .filter(|p| has_wanted_extension(p, extensions))
        .collect();

    files.sort();
    debug!(dir = %dir.display(), recursive, count = files.len(), "scan complete");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(p: &Path) {
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(p, b"x").unwrap();
    }

    #[test]
    fn filters_extensions_case_insensitively_and_sorts() {
        let td = tempdir().unwrap();
        touch(&td.path().join("b.MP3"));
        touch(&td.path().join("a.flac"));
        touch(&td.path().join("notes.txt"));
        touch(&td.path().join("noext"));

        let got = collect_audio_files(td.path(), false, &default_extensions()).unwrap();
        assert_eq!(got, vec![td.path().join("a.flac"), td.path().join("b.MP3")]);
    }

    #[test]
    fn recursion_is_opt_in() {
        let td = tempdir().unwrap();
        touch(&td.path().join("top.ogg"));
        touch(&td.path().join("sub").join("deep.ogg"));

        let flat = collect_audio_files(td.path(), false, &default_extensions()).unwrap();
        assert_eq!(flat.len(), 1);
        let all = collect_audio_files(td.path(), true, &default_extensions()).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn hidden_and_internal_entries_are_skipped() {
        let td = tempdir().unwrap();
        touch(&td.path().join(".hidden.mp3"));
        touch(&td.path().join(".audio_rename.123.tmp.mp3"));
        touch(&td.path().join(".cache").join("x.mp3"));
        touch(&td.path().join("ok.mp3"));

        let got = collect_audio_files(td.path(), true, &default_extensions()).unwrap();
        assert_eq!(got, vec![td.path().join("ok.mp3")]);
    }

    #[test]
    fn missing_dir_is_invalid() {
        let td = tempdir().unwrap();
        let err = collect_audio_files(&td.path().join("nope"), false, &default_extensions()).unwrap_err();
        assert!(matches!(err, AudioRenameError::DirectoryInvalid(_)));
    }

    #[test]
    fn extension_list_parsing() {
        assert_eq!(parse_extension_list(".MP3, ogg  flac,"), vec!["mp3", "ogg", "flac"]);
    }
}
