//! Audit record type and its line format.

use chrono::{DateTime, Local, NaiveDateTime};

use super::error::{AuditError, Result};

/// Timestamp layout written after the subject, e.g. `2026-01-23T10:00:00.123`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Separator between the subject and the timestamp.
pub const FIELD_SEPARATOR: char = ',';

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// A single audit event: who did something, and when.
///
/// Only the serialized line is ever persisted. The subject is written
/// verbatim, so it must be non-empty and fit on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    subject: String,
    timestamp: NaiveDateTime,
}

impl AuditRecord {
    /// Create a record, rejecting subjects that cannot be written verbatim.
    pub fn new(subject: impl Into<String>, timestamp: NaiveDateTime) -> Result<Self> {
        let subject = subject.into();
        validate_subject(&subject)?;
        Ok(Self { subject, timestamp })
    }

    /// Create a record stamped with the current local time.
    pub fn now(subject: impl Into<String>) -> Result<Self> {
        Self::new(subject, Local::now().naive_local())
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Serialize to one line, without the trailing line ending.
    pub fn to_line(&self) -> String {
        format!(
            "{}{}{}",
            self.subject,
            FIELD_SEPARATOR,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }

    /// Parse a user-supplied timestamp.
    ///
    /// Accepts the line format itself (`2026-01-23T10:00:00`), the same with a
    /// space instead of `T`, and RFC 3339 with an offset (kept as wall-clock
    /// time in that offset).
    pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
        let input = input.trim();
        NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f"))
            .or_else(|_| DateTime::parse_from_rfc3339(input).map(|dt| dt.naive_local()))
            .map_err(|e| {
                AuditError::InvalidRecord(format!("invalid timestamp '{input}': {e}"))
            })
    }
}

fn validate_subject(subject: &str) -> Result<()> {
    if subject.is_empty() {
        return Err(AuditError::InvalidRecord("subject is empty".into()));
    }
    if subject.contains(['\n', '\r']) {
        return Err(AuditError::InvalidRecord(format!(
            "subject '{}' contains a line break",
            subject.escape_debug()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 23).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_to_line_starts_with_subject() {
        let record = AuditRecord::new("user1", ts(10, 0, 0)).unwrap();
        assert_eq!(record.to_line(), "user1,2026-01-23T10:00:00");
        assert!(record.to_line().starts_with("user1"));
    }

    #[test]
    fn test_to_line_keeps_fractional_seconds() {
        let t = NaiveDate::from_ymd_opt(2026, 1, 23)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 250)
            .unwrap();
        let record = AuditRecord::new("alice", t).unwrap();
        assert_eq!(record.to_line(), "alice,2026-01-23T10:00:00.250");
    }

    #[test]
    fn test_empty_subject_rejected() {
        let err = AuditRecord::new("", ts(10, 0, 0)).unwrap_err();
        assert!(err.is_invalid_record());
    }

    #[test]
    fn test_whitespace_subject_is_not_empty() {
        let record = AuditRecord::new("   ", ts(10, 0, 0)).unwrap();
        assert!(record.to_line().starts_with("   ,"));
    }

    #[test]
    fn test_subject_with_line_break_rejected() {
        assert!(AuditRecord::new("user\n2", ts(10, 0, 0)).is_err());
        assert!(AuditRecord::new("user\r2", ts(10, 0, 0)).is_err());
    }

    #[test]
    fn test_subject_with_comma_or_quote_written_verbatim() {
        let record = AuditRecord::new("doe,john", ts(10, 0, 0)).unwrap();
        assert_eq!(record.to_line(), "doe,john,2026-01-23T10:00:00");

        let record = AuditRecord::new("\"quoted\"", ts(10, 0, 0)).unwrap();
        assert!(record.to_line().starts_with("\"quoted\","));
    }

    #[test]
    fn test_subject_with_spaces_and_unicode_allowed() {
        let record = AuditRecord::new("Jörg Müller", ts(8, 30, 0)).unwrap();
        assert!(record.to_line().starts_with("Jörg Müller,"));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(
            AuditRecord::parse_timestamp("2026-01-23T10:00:00").unwrap(),
            ts(10, 0, 0)
        );
        assert_eq!(
            AuditRecord::parse_timestamp("2026-01-23 10:00:00").unwrap(),
            ts(10, 0, 0)
        );
        assert_eq!(
            AuditRecord::parse_timestamp("2026-01-23T10:00:00+02:00").unwrap(),
            ts(10, 0, 0)
        );
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        let err = AuditRecord::parse_timestamp("yesterday").unwrap_err();
        assert!(err.is_invalid_record());

        let err = AuditRecord::parse_timestamp("2026-02-30T10:00:00").unwrap_err();
        assert!(err.is_invalid_record());
    }

    #[test]
    fn test_line_round_trips_through_parse() {
        let record = AuditRecord::new("bob", ts(23, 59, 59)).unwrap();
        let line = record.to_line();
        let (_, stamp) = line.split_once(FIELD_SEPARATOR).unwrap();
        assert_eq!(AuditRecord::parse_timestamp(stamp).unwrap(), record.timestamp());
    }
}
