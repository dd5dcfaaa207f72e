use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub audit: AuditSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The `[audit]` table as written in the config file.
#[derive(Debug, Deserialize)]
pub struct AuditSection {
    /// Segment directory; `~` and environment variables are expanded.
    #[serde(default)]
    pub directory: Option<String>,
    /// Records per segment file (default: 1000)
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self { directory: None, max_lines: default_max_lines() }
    }
}

pub fn default_max_lines() -> usize {
    1000
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Audit writer settings with paths expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub directory: Option<PathBuf>,
    pub max_lines: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { directory: None, max_lines: default_max_lines() }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub audit: AuditConfig,
    pub logging: LoggingConfig,
}
