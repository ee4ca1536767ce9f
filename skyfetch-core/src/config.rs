use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::Location,
};

/// Application-wide settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSection {
    /// Default log level when no `-v` flag or `RUST_LOG` is given.
    pub log_level: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppSection,

    /// One table per provider holding its chosen location.
    ///
    /// Example TOML:
    /// [providers.accu]
    /// name = "Lviv"
    /// url = "https://www.accuweather.com/..."
    #[serde(default)]
    pub providers: HashMap<String, Location>,
}

impl Config {
    /// Load config from `path`. A missing file is a normal first run
    /// and yields the defaults; an unreadable or malformed file is a
    /// typed error for the caller to handle.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|err| Error::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Lenient variant used on the run path: a broken config file must
    /// never take a run down, so it degrades to defaults with a
    /// warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err}; falling back to defaults");
                Self::default()
            }
        }
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;

        Ok(())
    }

    /// The location chosen for `provider`, if one was persisted.
    pub fn location_for(&self, provider: &str) -> Option<&Location> {
        self.providers.get(provider)
    }

    pub fn set_location(&mut self, provider: &str, location: Location) {
        self.providers.insert(provider.to_string(), location);
    }

    pub fn log_level(&self) -> Option<&str> {
        self.app.log_level.as_deref()
    }

    pub fn set_log_level(&mut self, level: &str) {
        self.app.log_level = Some(level.to_string());
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory holding cached pages.
    pub fn cache_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.cache_dir().join("pages"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "skyfetch", "skyfetch").ok_or(Error::NoProjectDirs)
}
