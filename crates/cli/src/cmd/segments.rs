use color_eyre::eyre::Result;
use rotalog_core::audit::list_segments;
use rotalog_core::config::loader::ConfigError;
use rotalog_core::config::types::ResolvedConfig;

use super::{require_config, resolve_dir};
use crate::TargetArgs;

pub fn run(loaded: Result<ResolvedConfig, ConfigError>, args: &TargetArgs) -> Result<()> {
    let rc = require_config(loaded)?;
    let dir = resolve_dir(&rc, args.dir.as_deref())?;

    let segments = list_segments(&dir)?;
    if segments.is_empty() {
        println!("(no segments found)");
        return Ok(());
    }
    for segment in &segments {
        println!("{}", segment.path.display());
    }
    println!("-- {} segments --", segments.len());
    Ok(())
}
