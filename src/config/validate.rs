//! Config validation logic.
//! Compiles the naming template and checks the working directory.
//!
//! The template is checked first so a bad format is reported before anything
//! touches the filesystem.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::Config;
use crate::errors::AudioRenameError;
use crate::template::NameTemplate;

/// Validate `cfg` in place: compile the template and canonicalize `directory`.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<NameTemplate, AudioRenameError> {
    let template = NameTemplate::compile(&cfg.format).inspect_err(|e| {
        error!(format = %cfg.format, error = %e, "invalid naming format");
    })?;

    ensure_dir_exists_and_is_dir(&cfg.directory)?;
    ensure_readable(&cfg.directory)?;
    cfg.directory = dunce::canonicalize(&cfg.directory)
        .map_err(|_| AudioRenameError::DirectoryInvalid(cfg.directory.clone()))?;

    info!(
        directory = %cfg.directory.display(),
        format = %template,
        log_file = %cfg
            .log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into()),
        "config validated"
    );
    Ok(template)
}

/// Ensure path exists and is a directory.
fn ensure_dir_exists_and_is_dir(path: &Path) -> Result<(), AudioRenameError> {
    if !path.is_dir() {
        error!(path = %path.display(), "working directory does not exist or is not a directory");
        return Err(AudioRenameError::DirectoryInvalid(path.to_path_buf()));
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path) -> Result<(), AudioRenameError> {
    fs::read_dir(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "cannot read working directory");
        AudioRenameError::DirectoryInvalid(path.to_path_buf())
    })?;
    debug!(path = %path.display(), "working directory readable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::FormatError;
    use tempfile::tempdir;

    #[test]
    fn canonicalizes_directory_and_compiles() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path().join("."), "title");
        let tpl = validate_and_normalize(&mut cfg).unwrap();
        assert_eq!(tpl.to_string(), "title");
        assert_eq!(cfg.directory, dunce::canonicalize(td.path()).unwrap());
    }

    #[test]
    fn format_error_wins_over_bad_directory() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path().join("missing"), "???");
        let err = validate_and_normalize(&mut cfg).unwrap_err();
        assert!(matches!(
            err,
            AudioRenameError::Format(FormatError::ReservedCharacter { .. })
        ));
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn file_is_not_a_working_directory() {
        let td = tempdir().unwrap();
        let file = td.path().join("song.mp3");
        fs::write(&file, b"x").unwrap();
        let mut cfg = Config::new(&file, "title");
        let err = validate_and_normalize(&mut cfg).unwrap_err();
        assert_eq!(err.code(), 3);
    }
}
