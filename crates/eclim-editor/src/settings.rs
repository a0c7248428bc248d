//! Persisted settings: the location of the eclim executable.
//!
//! Stored as pretty-printed JSON, by default at `<config dir>/eclim-java/settings.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name below the platform config directory.
pub const SETTINGS_DIR: &str = "eclim-java";
/// Settings file name.
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
/// Errors produced while loading or saving [`Settings`].
pub enum SettingsError {
    #[error("I/O error: {0}")]
    /// Reading or writing the settings file failed.
    Io(#[from] io::Error),

    #[error("invalid settings file: {0}")]
    /// The settings file is not valid JSON for [`Settings`].
    Json(#[from] serde_json::Error),

    #[error("no configuration directory available on this platform")]
    /// The platform config directory could not be determined.
    NoConfigDir,

    #[error("cannot expand '~': no home directory")]
    /// A `~` path was given but the home directory is unknown.
    NoHomeDir,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// User settings.
pub struct Settings {
    /// Absolute path of the eclim executable inside the Eclipse installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eclim_executable_location: Option<PathBuf>,
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    }

    /// The configured eclim executable, if any.
    pub fn eclim_executable(&self) -> Option<&Path> {
        self.eclim_executable_location
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Expand a leading `~` and make `input` absolute.
pub fn expand_tool_path(input: &str) -> Result<PathBuf, SettingsError> {
    let input = input.trim();
    let expanded = if input == "~" {
        dirs::home_dir().ok_or(SettingsError::NoHomeDir)?
    } else if let Some(rest) = input.strip_prefix("~/") {
        dirs::home_dir().ok_or(SettingsError::NoHomeDir)?.join(rest)
    } else {
        PathBuf::from(input)
    };
    Ok(std::path::absolute(expanded)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_location_counts_as_unset() {
        let settings = Settings {
            eclim_executable_location: Some(PathBuf::new()),
        };
        assert_eq!(settings.eclim_executable(), None);
    }

    #[test]
    fn test_expand_relative_path_is_absolute() {
        let path = expand_tool_path("eclipse/eclim").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("eclipse/eclim"));
    }
}
