use rotalog_core::audit::RotatingAuditWriter;
use rotalog_core::config::loader::ConfigLoader;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_full_config_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1

[audit]
directory = "/tmp/rotalog-audit"
max_lines = 50

[logging]
level = "debug"
file_level = "trace"
file = "/tmp/rotalog.log"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.audit.directory, Some(PathBuf::from("/tmp/rotalog-audit")));
    assert_eq!(rc.audit.max_lines, 50);
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file_level.as_deref(), Some("trace"));
    assert_eq!(rc.logging.file, Some(PathBuf::from("/tmp/rotalog.log")));
}

#[test]
fn defaults_apply_for_missing_sections() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "version = 1\n");

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.audit.directory, None);
    assert_eq!(rc.audit.max_lines, 1000);
    assert_eq!(rc.logging.level, "info");
    assert!(rc.logging.file.is_none());
}

#[test]
fn writer_from_loaded_config() {
    let tmp = tempdir().unwrap();
    let audit_dir = tmp.path().join("audit");
    fs::create_dir(&audit_dir).unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = format!(
        "version = 1\n[audit]\ndirectory = \"{}\"\nmax_lines = 3\n",
        audit_dir.display()
    );
    write_file(&cfg_path, &toml);

    let rc = ConfigLoader::load(Some(&cfg_path)).unwrap();
    let writer = RotatingAuditWriter::from_config(&rc).unwrap();
    assert_eq!(writer.max_lines(), 3);
    assert_eq!(writer.directory(), audit_dir.as_path());
}

#[test]
fn load_or_default_still_requires_explicit_path() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("nope.toml");
    assert!(ConfigLoader::load_or_default(Some(&missing)).is_err());
}
