//! Field normalization.
//! Converts raw metadata values into a `TrackMetadata` with every field defined,
//! so rendering never fails because of missing or malformed tags.

use crate::metadata::{FieldKey, MetadataSource};

pub const DEFAULT_ARTIST: &str = "No Artist";
pub const DEFAULT_ALBUM: &str = "No Album";
pub const DEFAULT_COMPOSER: &str = "No Composer";
pub const DEFAULT_TITLE: &str = "No Title";

/// Normalized, immutable snapshot of one file's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub artist: String,
    pub album: String,
    pub composer: String,
    pub title: String,
    pub track: u32,
    pub disc: u32,
    pub year: u32,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            artist: DEFAULT_ARTIST.to_string(),
            album: DEFAULT_ALBUM.to_string(),
            composer: DEFAULT_COMPOSER.to_string(),
            title: DEFAULT_TITLE.to_string(),
            track: 0,
            disc: 0,
            year: 0,
        }
    }
}

/// Build a `TrackMetadata` from raw values. Never fails.
pub fn normalize(raw: &dyn MetadataSource) -> TrackMetadata {
    let text = |key: FieldKey, default: &str| -> String {
        raw.get(key)
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    };

    let album = clean_album(&text(FieldKey::Album, DEFAULT_ALBUM));

    TrackMetadata {
        artist: text(FieldKey::Artist, DEFAULT_ARTIST),
        album,
        composer: text(FieldKey::Composer, DEFAULT_COMPOSER),
        title: text(FieldKey::Title, DEFAULT_TITLE),
        track: raw.get(FieldKey::TrackNumber).map_or(0, |v| parse_leading_int(v, '/')),
        disc: raw.get(FieldKey::DiscNumber).map_or(0, |v| parse_leading_int(v, '/')),
        year: raw.get(FieldKey::Date).map_or(0, |v| parse_leading_int(v, '-')),
    }
}

/// Parse the segment before `sep` as an unsigned integer; 0 when it isn't one.
///
/// "07/12" -> 7, "7" -> 7, "" -> 0, "A/B" -> 0, "2004-05-01" (sep '-') -> 2004
pub fn parse_leading_int(raw: &str, sep: char) -> u32 {
    raw.split(sep)
        .next()
        .map(str::trim)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0)
}

// Windows silently drops trailing dots and spaces when creating directories,
// which would make the computed path differ from the one on disk.
fn clean_album(album: &str) -> String {
    let cleaned = album.trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    if cleaned.is_empty() {
        DEFAULT_ALBUM.to_string()
    } else {
        cleaned.to_string()
    }
}
