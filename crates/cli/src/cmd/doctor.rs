use rotalog_core::audit::list_segments;
use rotalog_core::config::loader::{default_config_path, ConfigLoader};
use std::path::Path;

/// Print the resolved configuration. Returns `false` when it cannot be loaded.
pub fn run(config: Option<&Path>) -> bool {
    let rc = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL rotalog doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            return false;
        }
    };

    println!("OK   rotalog doctor");
    println!("version: {}", rotalog_core::version());
    println!(
        "path: {}",
        config.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    match rc.audit.directory {
        Some(ref dir) => {
            println!("audit.directory: {}", dir.display());
            match list_segments(dir) {
                Ok(segments) => println!("audit.segments: {}", segments.len()),
                Err(e) => println!("audit.segments: unavailable ({e})"),
            }
        }
        None => println!("audit.directory: (not set)"),
    }
    println!("audit.max_lines: {}", rc.audit.max_lines);
    println!("logging.level: {}", rc.logging.level);
    if let Some(ref file) = rc.logging.file {
        println!("logging.file: {}", file.display());
    }
    true
}
