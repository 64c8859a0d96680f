//! Naming templates.
//!
//! A template is a human-readable format string such as
//! `artist - album [track] title` or `artist(sep)album(sep)track - title`.
//! `compile` turns it into a `NameTemplate` once per run; `render` binds a
//! track's metadata to it for every file in the batch.
//!
//! Keywords: artist, album, composer, title, track, disc, year.
//! `(sep)` (or the older `(=)`) maps to the platform directory separator.

mod compile;
mod render;

pub use render::{RenderedPath, render};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::normalize::TrackMetadata;

/// Characters that cannot appear in a file name on the platforms we target.
pub const RESERVED_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Substitute for reserved characters found in rendered text.
pub const REPLACEMENT_CHAR: char = '+';

/// Directory separator marker; the first entry is the canonical spelling.
pub const SEPARATOR_MARKERS: [&str; 2] = ["(sep)", "(=)"];

/// Template used when neither the CLI nor the config names one.
pub const DEFAULT_FORMAT: &str = "artist - album [track] title";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error(
        "reserved character '{ch}' at offset {offset}; \\ / : * ? \" < > | cannot be used in file names"
    )]
    ReservedCharacter { ch: char, offset: usize },

    #[error(
        "format contains no metadata keyword (artist, album, composer, title, track, disc, year); every file would get the same name"
    )]
    NoFieldKeyword,

    #[error("empty path segment at offset {offset}; (sep) must sit between two name parts")]
    EmptyPathSegment { offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// A metadata field a template can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Artist,
    Album,
    Composer,
    Title,
    Track,
    Disc,
    Year,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Artist,
        Field::Album,
        Field::Composer,
        Field::Title,
        Field::Track,
        Field::Disc,
        Field::Year,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Composer => "composer",
            Field::Title => "title",
            Field::Track => "track",
            Field::Disc => "disc",
            Field::Year => "year",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Track | Field::Disc | Field::Year => FieldKind::Integer,
            _ => FieldKind::Text,
        }
    }

    /// Rendered value for this field, before sanitization.
    pub fn value(self, meta: &TrackMetadata) -> String {
        match self {
            Field::Artist => meta.artist.clone(),
            Field::Album => meta.album.clone(),
            Field::Composer => meta.composer.clone(),
            Field::Title => meta.title.clone(),
            Field::Track => meta.track.to_string(),
            Field::Disc => meta.disc.to_string(),
            Field::Year => meta.year.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    FieldRef(Field),
    PathSeparator,
}

/// A compiled, immutable naming template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    tokens: Vec<TemplateToken>,
}

impl NameTemplate {
    /// Compile a raw format string.
    pub fn compile(raw: &str) -> Result<Self, FormatError> {
        let tokens = compile::tokenize(raw)?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Fields referenced by this template, in order of first appearance.
    pub fn fields(&self) -> Vec<Field> {
        let mut out = Vec::new();
        for t in &self.tokens {
            if let TemplateToken::FieldRef(f) = t
                && !out.contains(f)
            {
                out.push(*f);
            }
        }
        out
    }

    /// True when the template creates subdirectories.
    pub fn has_subdirectories(&self) -> bool {
        self.tokens.contains(&TemplateToken::PathSeparator)
    }
}

impl Default for NameTemplate {
    fn default() -> Self {
        Self {
            tokens: vec![
                TemplateToken::FieldRef(Field::Artist),
                TemplateToken::Literal(" - ".into()),
                TemplateToken::FieldRef(Field::Album),
                TemplateToken::Literal(" [".into()),
                TemplateToken::FieldRef(Field::Track),
                TemplateToken::Literal("] ".into()),
                TemplateToken::FieldRef(Field::Title),
            ],
        }
    }
}

impl FromStr for NameTemplate {
    type Err = FormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.tokens {
            match t {
                TemplateToken::Literal(s) => f.write_str(s)?,
                TemplateToken::FieldRef(field) => f.write_str(field.keyword())?,
                TemplateToken::PathSeparator => f.write_str(SEPARATOR_MARKERS[0])?,
            }
        }
        Ok(())
    }
}
