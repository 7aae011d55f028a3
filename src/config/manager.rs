use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::Config;
use crate::errors::Result;

const HOME_ENV: &str = "BUDGET_ENGINE_HOME";
const ENGINE_DIR: &str = ".budget_engine";
const CONFIG_FILE: &str = "config.json";

/// Reads and writes the engine [`Config`] as a JSON file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager for `$BUDGET_ENGINE_HOME/config.json`, falling back to
    /// `~/.budget_engine/config.json`.
    pub fn default_location() -> Result<Self> {
        let base = match env::var_os(HOME_ENV) {
            Some(home) => PathBuf::from(home),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(ENGINE_DIR),
        };
        Self::with_base_dir(base)
    }

    /// Creates `base` if needed and keeps the config file directly inside it.
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the stored config; a missing file yields the defaults and
    /// missing fields take their default values.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.is_file() {
            debug!(path = %self.config_path.display(), "no stored configuration, using defaults");
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(&self.config_path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes `config` beside the target first and renames it into place, so
    /// readers never observe a half-written file.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let staging = self.config_path.with_extension("json.partial");
        fs::write(&staging, serde_json::to_vec_pretty(config)?)?;
        fs::rename(&staging, &self.config_path)?;
        debug!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }
}
