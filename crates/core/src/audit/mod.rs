//! Append-only audit records in rotating CSV segments.
//!
//! Each record is one line, `subject,timestamp`, appended to
//! `audit_<N>.csv` in the target directory. Once a segment holds the
//! configured number of lines, the next record opens `audit_<N+1>.csv`.
//!
//! ```rust,ignore
//! use rotalog_core::audit::RotatingAuditWriter;
//!
//! let mut writer = RotatingAuditWriter::new(2, "/var/log/app/audit")?;
//! writer.add_record("user1", chrono::Local::now().naive_local())?;
//! ```

mod error;
mod segment;
mod types;
mod writer;

pub use error::AuditError;
pub use segment::{
    Segment, list_segments, next_index, parse_segment_index, segment_file_name,
};
pub use types::{AuditRecord, FIELD_SEPARATOR, LINE_ENDING, TIMESTAMP_FORMAT};
pub use writer::RotatingAuditWriter;
