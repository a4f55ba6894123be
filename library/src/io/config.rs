//! Library configuration stored in `library.toml`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name looked up in the data directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "library.toml";

/// Library configuration (TOML).
///
/// Missing fields default to the three built-in libraries stored in the
/// current directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory holding the per-library record files.
    pub data_dir: PathBuf,

    /// Libraries offered in the selection menu, in menu order.
    pub libraries: Vec<LibraryEntry>,
}

/// One selectable library and the record file backing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryEntry {
    /// Short handle used by one-shot CLI commands (`--library city`).
    pub id: String,
    /// Display name shown in menus.
    pub name: String,
    /// Record file name, relative to `data_dir`.
    pub file: String,
}

impl LibraryEntry {
    fn new(id: &str, name: &str, file: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            file: file.to_string(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            libraries: vec![
                LibraryEntry::new("city", "City Library", "city_library.json"),
                LibraryEntry::new("university", "University Library", "university_library.json"),
                LibraryEntry::new("school", "School Library", "school_library.json"),
            ],
        }
    }
}

impl LibraryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.libraries.is_empty() {
            return Err(anyhow!("libraries must contain at least one entry"));
        }
        let mut ids = HashSet::new();
        let mut files = HashSet::new();
        for entry in &self.libraries {
            validate_id(&entry.id)?;
            if !ids.insert(entry.id.as_str()) {
                return Err(anyhow!("duplicate library id '{}'", entry.id));
            }
            if entry.name.trim().is_empty() {
                return Err(anyhow!("library '{}': name must not be empty", entry.id));
            }
            if entry.file.trim().is_empty() {
                return Err(anyhow!("library '{}': file must not be empty", entry.id));
            }
            if entry.file.contains('/') || entry.file.contains('\\') {
                return Err(anyhow!(
                    "library '{}': file must be a plain file name (got '{}')",
                    entry.id,
                    entry.file
                ));
            }
            if !files.insert(entry.file.as_str()) {
                return Err(anyhow!("duplicate library file '{}'", entry.file));
            }
        }
        Ok(())
    }

    /// Look up a library by id.
    pub fn library(&self, id: &str) -> Result<&LibraryEntry> {
        self.libraries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| {
                let known: Vec<&str> = self.libraries.iter().map(|e| e.id.as_str()).collect();
                anyhow!("unknown library '{}' (known: {})", id, known.join(", "))
            })
    }

    /// Path of the record file backing `entry`.
    pub fn record_path(&self, entry: &LibraryEntry) -> PathBuf {
        self.data_dir.join(&entry.file)
    }
}

/// Validate a library id: non-empty, `[A-Za-z0-9._-]` only.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(anyhow!("library id must not be empty"));
    }
    if id
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'))
    {
        return Err(anyhow!("library id must be [A-Za-z0-9._-] only (got '{id}')"));
    }
    Ok(())
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LibraryConfig::default()`. A relative
/// `data_dir` read from the file is resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<LibraryConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        let cfg = LibraryConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut cfg: LibraryConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    if cfg.data_dir.is_relative() {
        if let Some(parent) = path.parent() {
            cfg.data_dir = parent.join(&cfg.data_dir);
        }
    }
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), libraries = cfg.libraries.len(), "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &LibraryConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
