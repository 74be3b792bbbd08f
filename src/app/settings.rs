use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, domain::weather::Units};

pub const MAX_RECENT_SEARCHES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Preferences and history that survive between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub units: Units,
    /// Most recent first.
    pub recent_searches: Vec<String>,
}

impl Settings {
    /// Moves `label` to the front. An existing entry differing only in case is replaced.
    pub fn push_recent(&mut self, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            return;
        }
        let folded = label.to_lowercase();
        self.recent_searches
            .retain(|existing| existing.to_lowercase() != folded);
        self.recent_searches.insert(0, label.to_string());
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }

    #[must_use]
    pub fn most_recent(&self) -> Option<&str> {
        self.recent_searches.first().map(String::as_str)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(units) = cli.units {
            self.units = units.into();
        }
        if let Some(theme) = cli.theme {
            self.theme = theme.into();
        }
    }
}

/// Saved settings at `path` (if any) with CLI overrides applied on top.
/// A missing or unreadable file falls back to defaults.
pub fn load_settings(cli: &Cli, path: Option<&Path>) -> Settings {
    let mut settings = path.map(read_settings).unwrap_or_default();
    settings.apply_cli(cli);
    settings
}

fn read_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Settings::default(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "reading settings failed");
            return Settings::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "ignoring corrupt settings file");
        Settings::default()
    })
}

pub fn save_settings(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    settings_path_from(
        std::env::var_os("SKYBOARD_CONFIG_DIR"),
        std::env::var_os("HOME"),
    )
}

fn settings_path_from(config_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(base) = config_dir {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("skyboard")
            .join("settings.json"),
    )
}
