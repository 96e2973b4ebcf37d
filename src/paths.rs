//! Path resolution for the settings file and the catalog source.
//!
//! Uses env vars when set, otherwise XDG defaults.

use std::path::{Path, PathBuf};

use crate::config::Settings;

/// Catalog location used when nothing else is configured.
pub const DEFAULT_CATALOG: &str = "docs/data.json";

/// Resolved locations.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_file: PathBuf,
    pub catalog_override: Option<String>,
}

impl Paths {
    /// Resolve paths from environment, falling back to XDG/defaults.
    pub fn resolve() -> Self {
        let config_file = resolve_path(
            "CATVIEW_CONFIG",
            dirs::config_dir().map(|p| p.join("catview/config.json")),
            "~/.config/catview/config.json",
        );
        let catalog_override = env_value("CATVIEW_CATALOG");

        Self {
            config_file,
            catalog_override,
        }
    }

    /// Paths rooted at an explicit settings file (no env lookup).
    pub fn with_config_file(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
            catalog_override: None,
        }
    }

    /// Settings file (`config.json`).
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Pick the catalog source: command line, then `CATVIEW_CATALOG`, then
    /// the `catalog` setting, then [`DEFAULT_CATALOG`].
    pub fn catalog_source(&self, cli: Option<&str>, settings: &Settings) -> String {
        cli.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .or_else(|| self.catalog_override.clone())
            .or_else(|| settings.catalog.clone().filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_CATALOG.to_string())
    }
}

fn env_value(env_var: &str) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn resolve_path(env_var: &str, xdg_default: Option<PathBuf>, fallback: &str) -> PathBuf {
    if let Some(val) = env_value(env_var) {
        return expand_tilde(&val);
    }
    xdg_default.unwrap_or_else(|| expand_tilde(fallback))
}

pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}
