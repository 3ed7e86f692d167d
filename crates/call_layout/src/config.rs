use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "call_layout.toml";
pub const DEFAULT_GRID_MAX_ITEMS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    /// Maximum number of remote tiles the grid page shows before the rest
    /// spill into the overflow strip.
    pub grid_max_items: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            grid_max_items: DEFAULT_GRID_MAX_ITEMS,
        }
    }
}

impl LayoutSettings {
    pub fn with_grid_max_items(grid_max_items: usize) -> Result<Self, SettingsError> {
        let settings = Self { grid_max_items };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_max_items == 0 {
            return Err(SettingsError::ZeroGridCapacity);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("grid_max_items must be at least 1")]
    ZeroGridCapacity,
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    grid_max_items: Option<usize>,
}

/// Loads layout settings: defaults, then the settings file, then environment.
///
/// An explicit `path` must exist; the default `call_layout.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<LayoutSettings> {
    let mut settings = LayoutSettings::default();

    let (path, required): (PathBuf, bool) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    match fs::read_to_string(&path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw).with_context(|| {
                format!("failed to parse layout settings '{}'", path.display())
            })?;
            if let Some(v) = file_cfg.grid_max_items {
                settings.grid_max_items = v;
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {}
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed to read layout settings '{}'", path.display())
            });
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    settings.validate()?;
    Ok(settings)
}

fn apply_env_overrides(
    settings: &mut LayoutSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    for key in ["GRID_MAX_ITEMS", "APP__GRID_MAX_ITEMS"] {
        if let Some(v) = lookup(key) {
            settings.grid_max_items =
                v.trim()
                    .parse::<usize>()
                    .map_err(|_| SettingsError::InvalidValue {
                        key: "grid_max_items",
                        value: v.clone(),
                    })?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
