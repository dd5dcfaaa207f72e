use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use rotalog_core::audit::{AuditRecord, RotatingAuditWriter};
use rotalog_core::config::loader::ConfigError;
use rotalog_core::config::types::ResolvedConfig;

use super::{require_config, resolve_dir};
use crate::RecordArgs;

pub fn run(loaded: Result<ResolvedConfig, ConfigError>, args: &RecordArgs) -> Result<()> {
    let rc = require_config(loaded)?;
    let dir = resolve_dir(&rc, args.target.dir.as_deref())?;
    let max_lines = args.max_lines.unwrap_or(rc.audit.max_lines);

    let timestamp = match args.at {
        Some(ref at) => AuditRecord::parse_timestamp(at)?,
        None => Local::now().naive_local(),
    };

    // Validate everything before the first line is written.
    let records = args
        .subjects
        .iter()
        .map(|s| AuditRecord::new(s.as_str(), timestamp))
        .collect::<Result<Vec<_>, _>>()?;

    let mut writer = RotatingAuditWriter::new(max_lines, &dir)
        .wrap_err_with(|| format!("cannot open audit directory {}", dir.display()))?;

    for record in &records {
        writer.append(record)?;
        if let Some(path) = writer.current_segment_path() {
            println!("recorded {} in {}", record.subject(), path.display());
        }
    }
    tracing::info!(
        "Appended {} records to {} (segments {}..={})",
        writer.records_written(),
        dir.display(),
        writer.start_index(),
        writer.current_segment_index()
    );
    Ok(())
}
