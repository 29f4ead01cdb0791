use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::common::constants::{
    DEFAULT_TARGET_YEAR, MUNICIPALITIES_FILE, NOMINATIONS_API,
};
use crate::common::error::{Result, ScrapeError};

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub data: DataConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub municipalities_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub target_year: i32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: NOMINATIONS_API.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            municipalities_path: MUNICIPALITIES_FILE.to_string(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            target_year: DEFAULT_TARGET_YEAR,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load `config.toml` from the working directory. An absent file falls
    /// back to the built-in defaults; an invalid one is reported and also
    /// falls back rather than aborting the run.
    pub fn load() -> Self {
        if !Path::new(CONFIG_PATH).exists() {
            return Self::default();
        }
        match Self::try_load(Path::new(CONFIG_PATH)) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ScrapeError::Config(format!("{} is invalid: {e}", path.display())))
    }
}
