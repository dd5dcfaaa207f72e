pub mod demo;
pub mod doctor;
pub mod record;
pub mod segments;

use color_eyre::eyre::{eyre, Result, WrapErr};
use rotalog_core::config::loader::ConfigError;
use rotalog_core::config::types::ResolvedConfig;
use std::path::{Path, PathBuf};

pub(crate) fn require_config(
    loaded: Result<ResolvedConfig, ConfigError>,
) -> Result<ResolvedConfig> {
    loaded.wrap_err("failed to load configuration")
}

/// `--dir` wins over `audit.directory`.
pub(crate) fn resolve_dir(rc: &ResolvedConfig, dir: Option<&Path>) -> Result<PathBuf> {
    dir.map(Path::to_path_buf).or_else(|| rc.audit.directory.clone()).ok_or_else(|| {
        eyre!("no audit directory configured; pass --dir or set audit.directory")
    })
}
