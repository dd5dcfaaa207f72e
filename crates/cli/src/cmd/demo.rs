use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use rotalog_core::audit::{list_segments, RotatingAuditWriter};
use rotalog_core::config::loader::ConfigError;
use rotalog_core::config::types::ResolvedConfig;
use std::fs;

use super::{require_config, resolve_dir};
use crate::TargetArgs;

const DEMO_MAX_LINES: usize = 2;
const DEMO_SUBJECTS: [&str; 3] = ["user1", "user2", "user3"];

pub fn run(loaded: Result<ResolvedConfig, ConfigError>, args: &TargetArgs) -> Result<()> {
    let rc = require_config(loaded)?;
    let dir = resolve_dir(&rc, args.dir.as_deref())?;

    fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;

    let mut writer = RotatingAuditWriter::new(DEMO_MAX_LINES, &dir)?;
    for subject in DEMO_SUBJECTS {
        writer.add_record(subject, Local::now().naive_local())?;
    }

    for segment in list_segments(&dir)? {
        println!("{}", segment.path.display());
    }
    Ok(())
}
