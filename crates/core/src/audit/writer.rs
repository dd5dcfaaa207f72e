//! Rotating segment writer.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::config::types::ResolvedConfig;

use super::error::{AuditError, Result};
use super::segment::{entry_names, next_index, segment_file_name};
use super::types::{AuditRecord, LINE_ENDING};

/// Appends audit records to `audit_<N>.csv` files, starting a new file once
/// the current one holds `max_lines` records.
///
/// The writer never reopens a segment that existed before it was constructed:
/// its first record goes to the first index past every existing segment.
/// No file handle is kept between calls, and `&mut self` on
/// [`add_record`](Self::add_record) keeps one append in flight per writer.
#[derive(Debug)]
pub struct RotatingAuditWriter {
    directory: PathBuf,
    max_lines: usize,
    start_index: u64,
    current_segment: u64,
    current_line_count: usize,
    records_written: u64,
}

impl RotatingAuditWriter {
    /// Create a writer for `directory`, which must already exist.
    ///
    /// No file is created until the first record is appended.
    pub fn new(max_lines: usize, directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        if max_lines == 0 {
            return Err(AuditError::InvalidConfiguration(
                "max_lines must be greater than zero".into(),
            ));
        }

        let start_index = next_index(entry_names(&directory)?).ok_or_else(|| {
            AuditError::InvalidConfiguration("segment index space exhausted".into())
        })?;
        tracing::info!(
            "Opened audit writer in {} (first segment: {}, max lines: {})",
            directory.display(),
            segment_file_name(start_index),
            max_lines
        );

        Ok(Self {
            directory,
            max_lines,
            start_index,
            current_segment: start_index,
            current_line_count: 0,
            records_written: 0,
        })
    }

    /// Create a writer from the `[audit]` section of a resolved config.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let directory = config.audit.directory.clone().ok_or_else(|| {
            AuditError::InvalidConfiguration("no audit directory configured".into())
        })?;
        Self::new(config.audit.max_lines, directory)
    }

    /// Append one record for `subject` at `timestamp`.
    pub fn add_record(&mut self, subject: &str, timestamp: NaiveDateTime) -> Result<()> {
        let record = AuditRecord::new(subject, timestamp)?;
        self.append(&record)
    }

    /// Append an already validated record.
    ///
    /// Counters only move once the line is on disk, so retrying a failed call
    /// targets the same segment and position.
    pub fn append(&mut self, record: &AuditRecord) -> Result<()> {
        let (segment, line_count) = if self.current_line_count >= self.max_lines {
            let next = self.current_segment.checked_add(1).ok_or_else(|| {
                AuditError::InvalidConfiguration("segment index space exhausted".into())
            })?;
            (next, 0)
        } else {
            (self.current_segment, self.current_line_count)
        };

        let path = self.directory.join(segment_file_name(segment));
        if segment != self.current_segment {
            tracing::debug!(
                "Rotating audit log: {} is full, continuing in {}",
                segment_file_name(self.current_segment),
                path.display()
            );
        }

        let mut line = record.to_line();
        line.push_str(LINE_ENDING);
        append_line(&path, &line, line_count == 0)?;

        self.current_segment = segment;
        self.current_line_count = line_count + 1;
        self.records_written += 1;

        tracing::debug!(
            "Recorded '{}' in {} (line {}/{})",
            record.subject(),
            path.display(),
            self.current_line_count,
            self.max_lines
        );
        Ok(())
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Index of the first segment this writer creates.
    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    /// Index of the segment that received the last record (or will receive
    /// the first one).
    pub fn current_segment_index(&self) -> u64 {
        self.current_segment
    }

    /// Records already in the current segment.
    pub fn current_line_count(&self) -> usize {
        self.current_line_count
    }

    /// Path of the segment holding the last record, once one was written.
    pub fn current_segment_path(&self) -> Option<PathBuf> {
        (self.records_written > 0)
            .then(|| self.directory.join(segment_file_name(self.current_segment)))
    }

    /// Records appended during this writer's lifetime.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}

/// Append `line` to `path` in a single write, undoing it on failure.
///
/// A fresh segment must not exist yet; a segment already holding lines must.
/// A file created by this call is removed again if the write fails; an
/// existing file is truncated back to its previous length.
fn append_line(path: &Path, line: &str, fresh: bool) -> Result<()> {
    append_with(path, line.as_bytes(), fresh, |file, bytes| {
        file.write_all(bytes)?;
        file.sync_data()
    })
}

fn append_with<F>(path: &Path, bytes: &[u8], fresh: bool, write: F) -> Result<()>
where
    F: FnOnce(&mut File, &[u8]) -> std::io::Result<()>,
{
    let mut file = open_for_append(path, fresh)?;

    let mut len_before = None;
    let outcome = file.metadata().and_then(|meta| {
        len_before = Some(meta.len());
        write(&mut file, bytes)
    });
    if let Err(e) = outcome {
        roll_back(file, path, len_before, fresh);
        return Err(AuditError::storage(path, e));
    }
    Ok(())
}

fn open_for_append(path: &Path, fresh: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.append(true);
    if fresh {
        options.create_new(true);
    }
    options.open(path).map_err(|e| AuditError::storage(path, e))
}

/// `len_before` is `None` when the failure came before anything was written.
fn roll_back(file: File, path: &Path, len_before: Option<u64>, created: bool) {
    if created {
        drop(file);
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("Failed to remove partial segment {}: {}", path.display(), e);
        }
    } else if let Some(len) = len_before
        && let Err(e) = file.set_len(len)
    {
        tracing::warn!("Failed to truncate {} back to {} bytes: {}", path.display(), len, e);
    }
}
