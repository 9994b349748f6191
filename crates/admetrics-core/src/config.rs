use std::path::{Path, PathBuf};

use admetrics_loader::SourceFiles;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::FilterDefaults;
use crate::report::ReportOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("environment variable {name}='{value}' is invalid: {message}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        message: String,
    },
}

pub const ENV_DATA_DIR: &str = "ADMETRICS_DATA_DIR";
pub const ENV_BIND: &str = "ADMETRICS_BIND";
pub const ENV_TOP_CAMPAIGNS: &str = "ADMETRICS_TOP_CAMPAIGNS";
pub const ENV_BUCKET: &str = "ADMETRICS_BUCKET";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNames {
    pub google: String,
    pub facebook: String,
    pub tiktok: String,
    pub business: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            google: "Google.csv".to_string(),
            facebook: "Facebook.csv".to_string(),
            tiktok: "TikTok.csv".to_string(),
            business: "Business.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub files: FileNames,
    pub defaults: FilterDefaults,
    pub report: ReportOptions,
    pub server: ServerConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            files: FileNames::default(),
            defaults: FilterDefaults::default(),
            report: ReportOptions::default(),
            server: ServerConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies `ADMETRICS_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    pub fn apply_env_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_BIND) {
            self.server.bind = value;
        }
        if let Some(value) = lookup(ENV_TOP_CAMPAIGNS) {
            self.report.top_campaigns =
                value
                    .trim()
                    .parse()
                    .map_err(|err: std::num::ParseIntError| ConfigError::InvalidEnv {
                        name: ENV_TOP_CAMPAIGNS,
                        value: value.clone(),
                        message: err.to_string(),
                    })?;
        }
        if let Some(value) = lookup(ENV_BUCKET) {
            self.defaults.bucket = value.parse().map_err(|err: crate::error::FilterError| {
                ConfigError::InvalidEnv {
                    name: ENV_BUCKET,
                    value: value.clone(),
                    message: err.to_string(),
                }
            })?;
        }
        Ok(())
    }

    pub fn source_files(&self) -> SourceFiles {
        SourceFiles {
            google: self.data_dir.join(&self.files.google),
            facebook: self.data_dir.join(&self.files.facebook),
            tiktok: self.data_dir.join(&self.files.tiktok),
            business: self.data_dir.join(&self.files.business),
        }
    }
}
