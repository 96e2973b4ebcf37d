//! Viewer settings (get/set), stored as JSON.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::Paths;
use crate::text::DEFAULT_DESCRIPTION_LIMIT;

pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/RHEcosystemAppEng/agentic-collections";
pub const DEFAULT_MARKETPLACE: &str = "redhat-agentic-collections";

/// Keys accepted by `config set`.
pub const KEYS: &[&str] = &["catalog", "description_limit", "repository_url", "marketplace"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog URL or path.
    pub catalog: Option<String>,
    /// Characters shown before a description collapses.
    pub description_limit: usize,
    /// Repository hosting the packs (README and docs links).
    pub repository_url: String,
    /// Marketplace name used in the install snippet.
    pub marketplace: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
            marketplace: DEFAULT_MARKETPLACE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings. A missing file yields defaults; missing keys too.
    pub fn load(paths: &Paths) -> Result<Self, ConfigError> {
        let path = paths.config_file();
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::ReadFailed(e, path.to_path_buf())),
        };
        serde_json::from_str(&content).map_err(ConfigError::ParseFailed)
    }

    pub fn readme_url(&self, pack: &str) -> String {
        format!("{}/tree/main/{}", self.repository_url.trim_end_matches('/'), pack)
    }

    pub fn docs_url(&self, pack: &str) -> String {
        format!("{}/docs", self.readme_url(pack))
    }

    /// Shell commands that install `plugin` from the marketplace.
    pub fn install_snippet(&self, plugin: &str) -> String {
        format!(
            "claude plugin marketplace remove {}\nclaude plugin marketplace add {}\nclaude plugin install {}",
            self.marketplace, self.repository_url, plugin
        )
    }
}

/// Current value of one setting, or `None` for unknown keys.
pub fn get_config_value(settings: &Settings, key: &str) -> Option<serde_json::Value> {
    serde_json::to_value(settings).ok()?.get(key).cloned()
}

/// Set a config value. Persists to the settings file.
/// Uses raw JSON to preserve keys this version does not know about.
pub fn set_config_value(paths: &Paths, key: &str, value: &str) -> Result<(), ConfigError> {
    if !KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }
    let new_value = match key {
        "description_limit" => value
            .trim()
            .parse::<usize>()
            .map(serde_json::Value::from)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            })?,
        _ => serde_json::Value::String(value.trim().to_string()),
    };

    let path = paths.config_file().to_path_buf();
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => "{}".to_string(),
        Err(e) => return Err(ConfigError::ReadFailed(e, path)),
    };
    let mut settings = match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(serde_json::Value::Object(obj)) => obj,
        _ => {
            // Unparseable settings move to `config.json.bak`.
            let backup = path.with_extension("json.bak");
            std::fs::rename(&path, &backup)
                .map_err(|e| ConfigError::BackupFailed(e, backup.clone()))?;
            tracing::warn!(backup = %backup.display(), "settings file was not a JSON object, starting fresh");
            serde_json::Map::new()
        }
    };
    settings.insert(key.to_string(), new_value);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(ConfigError::CreateDir)?;
    }
    let output = serde_json::to_string_pretty(&settings).map_err(ConfigError::SerializeFailed)?;
    std::fs::write(&path, output).map_err(|e| ConfigError::WriteFailed(e, path.clone()))?;

    tracing::debug!(key, path = %path.display(), "setting saved");
    Ok(())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown config key: {0} (expected one of: catalog, description_limit, repository_url, marketplace)")]
    UnknownKey(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Failed to back up unreadable settings to {}", .1.display())]
    BackupFailed(#[source] std::io::Error, PathBuf),
    #[error("Failed to read settings file {}", .1.display())]
    ReadFailed(#[source] std::io::Error, PathBuf),
    #[error("Failed to parse settings file")]
    ParseFailed(#[source] serde_json::Error),
    #[error("Failed to serialize settings")]
    SerializeFailed(#[source] serde_json::Error),
    #[error("Failed to create directory")]
    CreateDir(#[source] std::io::Error),
    #[error("Failed to write settings file {}", .1.display())]
    WriteFailed(#[source] std::io::Error, PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_paths() -> (tempfile::TempDir, Paths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::with_config_file(dir.path().join("nested/config.json"));
        (dir, paths)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let (_dir, paths) = temp_paths();
        assert_eq!(Settings::load(&paths).unwrap(), Settings::default());
    }

    #[test]
    fn set_then_load_round_trips() {
        let (_dir, paths) = temp_paths();
        set_config_value(&paths, "description_limit", "120").unwrap();
        set_config_value(&paths, "catalog", "https://example.com/data.json").unwrap();

        let settings = Settings::load(&paths).unwrap();
        assert_eq!(settings.description_limit, 120);
        assert_eq!(settings.catalog.as_deref(), Some("https://example.com/data.json"));
        assert_eq!(settings.marketplace, DEFAULT_MARKETPLACE);
    }

    #[test]
    fn unknown_keys_in_file_are_preserved() {
        let (_dir, paths) = temp_paths();
        std::fs::create_dir_all(paths.config_file().parent().unwrap()).unwrap();
        std::fs::write(paths.config_file(), r#"{"theme": "dark"}"#).unwrap();

        set_config_value(&paths, "marketplace", "acme").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(paths.config_file()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["marketplace"], "acme");
    }

    #[test]
    fn set_repairs_unreadable_file() {
        let (_dir, paths) = temp_paths();
        std::fs::create_dir_all(paths.config_file().parent().unwrap()).unwrap();
        std::fs::write(paths.config_file(), "{\"catalog\": ").unwrap();
        assert!(matches!(Settings::load(&paths), Err(ConfigError::ParseFailed(_))));

        set_config_value(&paths, "marketplace", "acme").unwrap();

        let settings = Settings::load(&paths).unwrap();
        assert_eq!(settings.marketplace, "acme");
        let backup = paths.config_file().with_extension("json.bak");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{\"catalog\": ");
    }

    #[test]
    fn rejects_unknown_key_and_bad_number() {
        let (_dir, paths) = temp_paths();
        assert!(matches!(
            set_config_value(&paths, "colour", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            set_config_value(&paths, "description_limit", "lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(!paths.config_file().exists());
    }

    #[test]
    fn get_reads_known_keys() {
        let settings = Settings::default();
        assert_eq!(
            get_config_value(&settings, "description_limit"),
            Some(serde_json::json!(200))
        );
        assert_eq!(get_config_value(&settings, "nope"), None);
    }

    #[test]
    fn links_follow_repository_url() {
        let settings = Settings {
            repository_url: "https://git.example.com/packs/".into(),
            ..Settings::default()
        };
        assert_eq!(settings.readme_url("ocp"), "https://git.example.com/packs/tree/main/ocp");
        assert_eq!(settings.docs_url("ocp"), "https://git.example.com/packs/tree/main/ocp/docs");
    }
}
