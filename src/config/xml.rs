//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; directory and template
//!   validation happen in `validate`.
//! - Unknown XML fields are a hard error to surface misconfigurations early.
//! - Empty elements count as unset.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::batch::FailurePolicy;
use crate::fs_ops::CollisionPolicy;
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};
use crate::scan::{DEFAULT_EXTENSIONS, parse_extension_list};
use crate::template::DEFAULT_FORMAT;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default)]
    directory: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    flatten: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    recursive: Option<bool>,
    #[serde(default)]
    on_collision: Option<String>,
    #[serde(default)]
    on_error: Option<String>,
    #[serde(default)]
    extensions: Option<String>,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    log_file: Option<String>,
}

// Accepts true/false/yes/no/1/0 with surrounding whitespace.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("expected true or false, got '{other}'"))),
        },
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Overlay parsed XML values onto `cfg`; unset elements keep the current value.
fn apply_xml(parsed: XmlConfig, cfg: &mut Config) -> Result<()> {
    if let Some(dir) = non_empty(parsed.directory) {
        cfg.directory = PathBuf::from(dir);
    }
    // The format is not trimmed: leading/trailing spaces are literal text.
    if let Some(fmt) = parsed.format.filter(|f| !f.trim().is_empty()) {
        cfg.format = fmt;
    }
    if let Some(b) = parsed.flatten {
        cfg.flatten = b;
    }
    if let Some(b) = parsed.recursive {
        cfg.recursive = b;
    }
    if let Some(s) = non_empty(parsed.on_collision) {
        cfg.on_collision = s.parse::<CollisionPolicy>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = non_empty(parsed.on_error) {
        cfg.on_error = s.parse::<FailurePolicy>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = non_empty(parsed.extensions) {
        let exts = parse_extension_list(&s);
        if exts.is_empty() {
            bail!("extensions list is empty");
        }
        cfg.extensions = exts;
    }
    if let Some(s) = non_empty(parsed.log_level) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = non_empty(parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    Ok(())
}

/// Parse XML text into a Config layered over the defaults.
pub fn parse_config_xml(contents: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    let mut cfg = Config::default();
    apply_xml(parsed, &mut cfg)?;
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("invalid config '{}'", path.display()))
}

/// Outcome of looking for the config file.
#[derive(Debug)]
pub enum LoadResult {
    /// A file was found and parsed.
    Loaded(Config, PathBuf),
    /// No file at the resolved location; defaults apply.
    Missing(Config, PathBuf),
}

impl LoadResult {
    pub fn into_config(self) -> Config {
        match self {
            LoadResult::Loaded(cfg, _) | LoadResult::Missing(cfg, _) => cfg,
        }
    }
}

/// Load `$AUDIO_RENAME_CONFIG` or the platform default; a missing file means defaults.
pub fn load_config() -> Result<LoadResult> {
    let path = default_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(LoadResult::Missing(Config::default(), path));
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(LoadResult::Loaded(cfg, path))
}

fn template_contents() -> String {
    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/audio_rename.log".into());
    format!(
        "<!--\n  audio_rename configuration (XML)\n\n  Fields:\n    directory     -> folder to scan (default: current directory)\n    format        -> naming template; keywords: artist album composer title track disc year\n                     use (sep) to start a subdirectory, e.g. artist(sep)album(sep)track - title\n    flatten       -> true: results go under `directory` instead of next to each file\n    recursive     -> true: also scan subdirectories\n    on_collision  -> disambiguate | skip\n    on_error      -> continue | stop\n    extensions    -> comma separated list of audio extensions\n    log_level     -> quiet | normal | info | debug\n    log_file      -> path to log file (optional; console logging still used)\n\n  CLI flags override XML values.\n-->\n<config>\n  <directory>.</directory>\n  <format>{}</format>\n  <flatten>false</flatten>\n  <recursive>false</recursive>\n  <on_collision>disambiguate</on_collision>\n  <on_error>continue</on_error>\n  <extensions>{}</extensions>\n  <log_level>normal</log_level>\n  <!-- <log_file>{}</log_file> -->\n</config>\n",
        DEFAULT_FORMAT,
        DEFAULT_EXTENSIONS.join(","),
        suggested_log
    )
}

/// Create a template config file (0600) and its parent directory (0700).
/// Refuses symlinked ancestors and existing files.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    write_config_secure_new_0600(path, template_contents().as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!(path = %path.display(), "created template config");
    Ok(())
}

/// Write the template at the resolved config location and return that path.
pub fn init_config() -> Result<PathBuf> {
    let path = default_config_path()?;
    create_template_config(&path)?;
    Ok(path)
}
