//! lofty-backed metadata reader.
//! The tag-identifier mapping is a static table owned by this adapter; ID3,
//! Vorbis comments, MP4 atoms and friends are unified by lofty's `ItemKey`.

use lofty::file::TaggedFileExt;
use lofty::tag::{ItemKey, Tag};
use std::path::Path;
use tracing::trace;

use super::{FieldKey, MetadataReader, RawTags};
use crate::errors::AudioRenameError;

/// Tag items consulted for each canonical field, in priority order.
fn item_keys(key: FieldKey) -> &'static [ItemKey] {
    match key {
        FieldKey::Artist => &[ItemKey::TrackArtist],
        FieldKey::Album => &[ItemKey::AlbumTitle],
        FieldKey::Composer => &[ItemKey::Composer],
        FieldKey::Title => &[ItemKey::TrackTitle],
        FieldKey::TrackNumber => &[ItemKey::TrackNumber],
        FieldKey::DiscNumber => &[ItemKey::DiscNumber],
        FieldKey::Date => &[ItemKey::RecordingDate, ItemKey::OriginalReleaseDate],
    }
}

/// Reads tags with lofty; the primary tag wins, other tags fill gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyReader;

impl LoftyReader {
    fn lookup(tags: &[&Tag], key: FieldKey) -> Option<String> {
        for tag in tags {
            for item in item_keys(key) {
                if let Some(v) = tag.get_string(item) {
                    let v = v.trim();
                    if !v.is_empty() {
                        return Some(v.to_string());
                    }
                }
            }
        }
        None
    }
}

impl MetadataReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<RawTags, AudioRenameError> {
        let tagged = lofty::read_from_path(path).map_err(|e| AudioRenameError::MetadataRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut ordered: Vec<&Tag> = Vec::new();
        if let Some(primary) = tagged.primary_tag() {
            ordered.push(primary);
        }
        for tag in tagged.tags() {
            if !ordered.iter().any(|t| std::ptr::eq(*t, tag)) {
                ordered.push(tag);
            }
        }

        let mut raw = RawTags::new();
        for key in FieldKey::ALL {
            if let Some(v) = Self::lookup(&ordered, key) {
                raw.insert(key, v);
            }
        }
        trace!(path = %path.display(), tags = ordered.len(), "read metadata");
        Ok(raw)
    }
}
