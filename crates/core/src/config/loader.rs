use crate::config::types::{
    AuditConfig, AuditSection, ConfigFile, LoggingConfig, ResolvedConfig,
};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("audit.max_lines must be greater than zero")]
    InvalidMaxLines,

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        let resolved = Self::resolve(&cf.audit, &cf.logging)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(resolved)
    }

    /// Like [`load`](Self::load), but a missing file at the default location
    /// yields default settings. An explicitly given path must exist.
    pub fn load_or_default(
        config_path: Option<&Path>,
    ) -> Result<ResolvedConfig, ConfigError> {
        match Self::load(config_path) {
            Err(ConfigError::NotFound(_)) if config_path.is_none() => {
                Ok(ResolvedConfig {
                    audit: AuditConfig::default(),
                    logging: LoggingConfig::default(),
                })
            }
            other => other,
        }
    }

    fn resolve(
        audit: &AuditSection,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        if audit.max_lines == 0 {
            return Err(ConfigError::InvalidMaxLines);
        }

        let directory = match &audit.directory {
            Some(dir) => Some(expand_path(dir)?),
            None => None,
        };

        // Resolve log file path if present
        let logging = if let Some(ref file) = log_cfg.file {
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            log_cfg.clone()
        };

        Ok(ResolvedConfig {
            audit: AuditConfig { directory, max_lines: audit.max_lines },
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("rotalog").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("rotalog").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
