//! Shared settings file (`~/.config/instashop/settings.toml`).
//!
//! Every key is optional; a missing file means defaults. CLI flags layer on
//! top of whatever is loaded here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use instashop_catalog::{CsvQuoting, DEFAULT_EXPORT_FILENAME, ExportOptions, KeyPolicy};
use serde::{Deserialize, Serialize};

use crate::error::LibError;

/// Default delay between starting field generation and reporting it done.
pub const DEFAULT_PACING_MS: u64 = 400;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
    pub ingest: IngestSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub include_index: bool,
    pub quoting: CsvQuoting,
    pub include_category: bool,
    /// Output file name used when no path is given.
    pub filename: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            include_index: false,
            quoting: CsvQuoting::default(),
            include_category: false,
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub key_policy: KeyPolicy,
    pub pacing_ms: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            key_policy: KeyPolicy::default(),
            pacing_ms: DEFAULT_PACING_MS,
        }
    }
}

impl Settings {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::default()
            .with_index(self.export.include_index)
            .with_quoting(self.export.quoting)
            .with_category(self.export.include_category)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.ingest.pacing_ms)
    }
}

/// Canonical path to the settings file: `~/.config/instashop/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("instashop").join("settings.toml")
}

/// Load settings from the canonical path.
pub fn load_settings() -> Result<Settings, LibError> {
    load_settings_from(&settings_path())
}

/// Load settings from `path`. A missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, LibError> {
    if !path.exists() {
        log::debug!("settings: {} not found, using defaults", path.display());
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| LibError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| LibError::SettingsParse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write settings to `path`, creating parent directories as needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), LibError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LibError::io(parent, e))?;
    }
    let serialized = toml::to_string_pretty(settings)?;

    // Write atomically
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized).map_err(|e| LibError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| LibError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let s = load_settings_from(&tmp.path().join("settings.toml")).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.export.filename, "inventory.csv");
        assert_eq!(s.export_options(), ExportOptions::default());
        assert_eq!(s.pacing(), Duration::from_millis(400));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[export]
quoting = "legacy"
include_index = true

[ingest]
key_policy = "disambiguate"
"#,
        )
        .unwrap();

        let s = load_settings_from(&path).unwrap();
        assert_eq!(s.export.quoting, CsvQuoting::Legacy);
        assert!(s.export.include_index);
        assert!(!s.export.include_category);
        assert_eq!(s.export.filename, DEFAULT_EXPORT_FILENAME);
        assert_eq!(s.ingest.key_policy, KeyPolicy::Disambiguate);
        assert_eq!(s.ingest.pacing_ms, DEFAULT_PACING_MS);
    }

    #[test]
    fn bad_value_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[export]\nquoting = \"fancy\"\n").unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(LibError::SettingsParse { .. })
        ));
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.toml");
        let mut s = Settings::default();
        s.export.include_category = true;
        s.export.filename = "shop.csv".into();
        s.ingest.pacing_ms = 0;

        save_settings_to(&path, &s).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_settings_from(&path).unwrap(), s);
    }
}
