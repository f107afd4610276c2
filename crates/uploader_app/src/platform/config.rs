use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;
use uploader_engine::PredictSettings;

use super::logging::LogDestination;

pub(crate) const CONFIG_FILENAME: &str = "uploader.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub predict: PredictSettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predict: PredictSettings::default(),
            log_destination: LogDestination::File,
            log_level: LevelFilter::Info,
        }
    }
}

/// Optional overrides read from `uploader.ron`; absent fields keep the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    endpoint: Option<String>,
    connect_timeout_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    log_destination: Option<LogDestination>,
    log_level: Option<String>,
}

impl ConfigFile {
    fn apply(self, mut config: AppConfig) -> Result<AppConfig, ConfigError> {
        if let Some(endpoint) = self.endpoint {
            config.predict.endpoint = endpoint;
        }
        if let Some(ms) = self.connect_timeout_ms {
            config.predict.connect_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(ms) = self.request_timeout_ms {
            config.predict.request_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(destination) = self.log_destination {
            config.log_destination = destination;
        }
        if let Some(level) = self.log_level {
            config.log_level =
                LevelFilter::from_str(&level).map_err(|_| ConfigError::LogLevel(level))?;
        }
        Ok(config)
    }
}

/// Reads `uploader.ron` from `dir`. A missing file is not an error.
pub(crate) fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let file: ConfigFile =
        ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;
    file.apply(AppConfig::default())
}
