// ABOUTME: Settings for moorage itself, read from moorage.yml.
// ABOUTME: Holds the resource tier table, default transport overrides and registry login.

mod compose_file;
mod init;

pub use compose_file::{DEFAULT_COMPOSE_FILE, load_compose_file};
pub use init::init_settings;

use crate::deploy::RegistryLogin;
use crate::error::{Error, Result};
use crate::resolve::{ResourceTier, ResourceTiers};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "moorage.yml";
pub const CONFIG_FILENAME_ALT: &str = "moorage.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".moorage/config.yml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    /// Replaces the built-in tier table when present.
    #[serde(default)]
    pub resource_tiers: Option<Vec<ResourceTier>>,

    /// `service=transport` entries, consulted after the command line ones.
    #[serde(default)]
    pub transport: Vec<String>,

    /// Registry login, filled in field by field from the command line.
    #[serde(default)]
    pub registry: RegistryLogin,
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file is a valid, empty settings file.
        if yaml.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&content).map_err(|e| Error::InvalidSettings {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        // Surface a bad tier table at load time rather than at plan time.
        settings.tiers().map_err(|e| Error::InvalidSettings {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load the first settings file found in `dir`, or defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!(dir = %dir.display(), "no settings file, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Path of the settings file `discover` would read.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// The tier table to validate reservations against.
    pub fn tiers(&self) -> Result<ResourceTiers> {
        match self.resource_tiers {
            Some(ref tiers) => Ok(ResourceTiers::new(tiers.clone())?),
            None => Ok(ResourceTiers::default()),
        }
    }

    /// Transport overrides: command line entries first, then settings entries.
    pub fn transport_args(&self, cli_args: Vec<String>) -> Vec<String> {
        let mut args = cli_args;
        args.extend(self.transport.iter().cloned());
        args
    }
}
