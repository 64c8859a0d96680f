//! Metadata access.
//! - `FieldKey` names the canonical fields the renamer understands.
//! - `MetadataSource` is the read-only view the normalizer consumes.
//! - `MetadataReader` turns a file path into a `RawTags` snapshot.
//!
//! Container decoding lives behind `MetadataReader`; the lofty adapter is the
//! production implementation, tests use in-memory readers.

mod lofty_reader;

pub use lofty_reader::LoftyReader;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::AudioRenameError;

/// Canonical metadata keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Artist,
    Album,
    Composer,
    Title,
    TrackNumber,
    DiscNumber,
    Date,
}

impl FieldKey {
    pub const ALL: [FieldKey; 7] = [
        FieldKey::Artist,
        FieldKey::Album,
        FieldKey::Composer,
        FieldKey::Title,
        FieldKey::TrackNumber,
        FieldKey::DiscNumber,
        FieldKey::Date,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Artist => "artist",
            FieldKey::Album => "album",
            FieldKey::Composer => "composer",
            FieldKey::Title => "title",
            FieldKey::TrackNumber => "tracknumber",
            FieldKey::DiscNumber => "discnumber",
            FieldKey::Date => "date",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artist" => Ok(FieldKey::Artist),
            "album" => Ok(FieldKey::Album),
            "composer" => Ok(FieldKey::Composer),
            "title" => Ok(FieldKey::Title),
            "tracknumber" => Ok(FieldKey::TrackNumber),
            "discnumber" => Ok(FieldKey::DiscNumber),
            "date" | "year" => Ok(FieldKey::Date),
            other => Err(format!("unknown metadata key: '{other}'")),
        }
    }
}

/// Read-only view over one file's raw metadata.
pub trait MetadataSource {
    /// Raw value for `key`, or None when the file does not carry it.
    fn get(&self, key: FieldKey) -> Option<&str>;
}

/// Owned snapshot of raw metadata values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    values: HashMap<FieldKey, String>,
}

impl RawTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl MetadataSource for RawTags {
    fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawTags {
    /// Collect `(key name, value)` pairs; unknown key names are ignored.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = RawTags::new();
        for (k, v) in iter {
            if let Ok(key) = k.into().parse::<FieldKey>() {
                tags.insert(key, v);
            }
        }
        tags
    }
}

/// Produces a metadata snapshot for a file.
pub trait MetadataReader {
    fn read(&self, path: &Path) -> Result<RawTags, AudioRenameError>;
}
