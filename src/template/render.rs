//! Rendering: bind normalized metadata to a compiled template.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use super::{NameTemplate, REPLACEMENT_CHAR, RESERVED_CHARS, TemplateToken};
use crate::normalize::TrackMetadata;

/// A rendered, sanitized relative path: directory segments, a file stem and
/// the original extension. Stem and extension are kept apart so a
/// disambiguation suffix can be placed between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPath {
    dirs: Vec<String>,
    stem: String,
    extension: Option<OsString>,
}

impl RenderedPath {
    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn extension(&self) -> Option<&OsStr> {
        self.extension.as_deref()
    }

    /// Relative directory produced by separator tokens (empty when none).
    pub fn relative_dir(&self) -> PathBuf {
        self.dirs.iter().collect()
    }

    pub fn file_name(&self) -> OsString {
        self.file_name_with_suffix("")
    }

    /// `stem + suffix + "." + extension`.
    pub fn file_name_with_suffix(&self, suffix: &str) -> OsString {
        let mut name = OsString::from(&self.stem);
        name.push(suffix);
        if let Some(ext) = &self.extension {
            name.push(".");
            name.push(ext);
        }
        name
    }

    /// Full relative path (directories plus file name).
    pub fn to_path(&self) -> PathBuf {
        self.relative_dir().join(self.file_name())
    }
}

fn sanitize_into(out: &mut String, text: &str) {
    out.extend(text.chars().map(|c| {
        if RESERVED_CHARS.contains(&c) {
            REPLACEMENT_CHAR
        } else {
            c
        }
    }));
}

// A segment made only of dots would address the current or a parent directory.
fn guard_dots(segment: String) -> String {
    if !segment.is_empty() && segment.chars().all(|c| c == '.') {
        segment.chars().map(|_| REPLACEMENT_CHAR).collect()
    } else {
        segment
    }
}

fn normalize_extension(extension: &OsStr) -> Option<OsString> {
    let ext = match extension.to_str() {
        Some(s) => OsString::from(s.strip_prefix('.').unwrap_or(s)),
        None => extension.to_os_string(),
    };
    if ext.is_empty() { None } else { Some(ext) }
}

/// Render `template` for one track. Deterministic and side-effect free.
pub fn render(template: &NameTemplate, meta: &TrackMetadata, extension: &OsStr) -> RenderedPath {
    let mut dirs = Vec::new();
    let mut current = String::new();

    for token in template.tokens() {
        match token {
            TemplateToken::Literal(text) => sanitize_into(&mut current, text),
            TemplateToken::FieldRef(field) => sanitize_into(&mut current, &field.value(meta)),
            TemplateToken::PathSeparator => dirs.push(guard_dots(std::mem::take(&mut current))),
        }
    }

    RenderedPath {
        dirs,
        stem: guard_dots(current),
        extension: normalize_extension(extension),
    }
}
