//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use audio_rename::{AudioRenameError, FieldKey, MetadataReader, RawTags};

/// In-memory reader: paths without an entry fail like unreadable tags.
#[derive(Default)]
pub struct TableReader {
    entries: HashMap<PathBuf, RawTags>,
}

impl TableReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &Path, tags: RawTags) -> Self {
        self.entries.insert(path.to_path_buf(), tags);
        self
    }

    /// Copy the entry of `from` to `to`, as a rename would carry the tags along.
    pub fn follow(&mut self, from: &Path, to: &Path) {
        if let Some(tags) = self.entries.get(from).cloned() {
            self.entries.insert(to.to_path_buf(), tags);
        }
    }
}

impl MetadataReader for TableReader {
    fn read(&self, path: &Path) -> Result<RawTags, AudioRenameError> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| AudioRenameError::MetadataRead {
                path: path.to_path_buf(),
                reason: "no tag found".into(),
            })
    }
}

pub fn sample_tags() -> RawTags {
    RawTags::new()
        .with(FieldKey::Artist, "Sample Artist")
        .with(FieldKey::Album, "Sample Album")
        .with(FieldKey::TrackNumber, "1")
        .with(FieldKey::Title, "Sample Title")
}

pub fn titled(title: &str) -> RawTags {
    RawTags::new().with(FieldKey::Title, title)
}

pub fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Sorted relative listing of every file under `root` (internal files included).
pub fn tree(root: &Path) -> Vec<String> {
    let mut out: Vec<String> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    out.sort();
    out
}

/// Bytes of a tiny, valid, untagged PCM WAV file.
pub fn minimal_wav() -> Vec<u8> {
    let data = [0u8; 8];
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&8000u32.to_le_bytes());
    out.extend_from_slice(&16000u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&data);
    out
}
