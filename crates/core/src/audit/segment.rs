//! Segment file naming and discovery.
//!
//! Segments are named `audit_<N>.csv` with an unpadded decimal index. Past
//! `audit_9.csv` a lexical sort no longer matches creation order, so anything
//! that orders segments goes through [`parse_segment_index`].

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{AuditError, Result};

pub const SEGMENT_PREFIX: &str = "audit_";
pub const SEGMENT_EXTENSION: &str = ".csv";

/// An existing segment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: u64,
    pub path: PathBuf,
}

/// File name for the segment with the given index.
pub fn segment_file_name(index: u64) -> String {
    format!("{SEGMENT_PREFIX}{index}{SEGMENT_EXTENSION}")
}

/// Extract the index from a segment file name.
///
/// Only canonical names are recognized: no sign, no leading zeros.
pub fn parse_segment_index(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(SEGMENT_PREFIX)?.strip_suffix(SEGMENT_EXTENSION)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

/// First index that cannot collide with any of `names`.
///
/// One past the highest existing segment index, or 0 when there is none.
/// For a directory written only by this crate that equals the segment count.
/// `None` when `audit_{u64::MAX}.csv` is taken.
pub fn next_index<I, S>(names: I) -> Option<u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match names.into_iter().filter_map(|n| parse_segment_index(n.as_ref())).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

/// Names of every entry in `dir`, files or not.
pub(crate) fn entry_names(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| AuditError::storage(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AuditError::storage(dir, e))?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

/// List the segment files in `dir`, ordered by index.
pub fn list_segments(dir: &Path) -> Result<Vec<Segment>> {
    let entries = fs::read_dir(dir).map_err(|e| AuditError::storage(dir, e))?;

    let mut segments = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AuditError::storage(dir, e))?;
        let file_type = entry.file_type().map_err(|e| AuditError::storage(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name();
        if let Some(index) = name.to_str().and_then(parse_segment_index) {
            segments.push(Segment { index, path: entry.path() });
        }
    }

    segments.sort_by_key(|s| s.index);
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_segment_file_name() {
        assert_eq!(segment_file_name(0), "audit_0.csv");
        assert_eq!(segment_file_name(11), "audit_11.csv");
    }

    #[test]
    fn test_parse_segment_index() {
        assert_eq!(parse_segment_index("audit_0.csv"), Some(0));
        assert_eq!(parse_segment_index("audit_42.csv"), Some(42));

        assert_eq!(parse_segment_index("audit_.csv"), None);
        assert_eq!(parse_segment_index("audit_01.csv"), None);
        assert_eq!(parse_segment_index("audit_+1.csv"), None);
        assert_eq!(parse_segment_index("audit_1.csv.bak"), None);
        assert_eq!(parse_segment_index("audit_1.txt"), None);
        assert_eq!(parse_segment_index("other_1.csv"), None);
    }

    #[test]
    fn test_next_index_empty() {
        assert_eq!(next_index(Vec::<String>::new()), Some(0));
        assert_eq!(next_index(["notes.txt", "audit.csv"]), Some(0));
    }

    #[test]
    fn test_next_index_contiguous_equals_count() {
        assert_eq!(next_index(["audit_0.csv", "audit_1.csv", "audit_2.csv"]), Some(3));
    }

    #[test]
    fn test_next_index_skips_past_gaps() {
        // Counting would yield 2 and later collide with audit_5.csv.
        assert_eq!(next_index(["audit_0.csv", "audit_5.csv"]), Some(6));
    }

    #[test]
    fn test_next_index_is_numeric_not_lexical() {
        assert_eq!(next_index(["audit_9.csv", "audit_10.csv", "audit_2.csv"]), Some(11));
    }

    #[test]
    fn test_next_index_exhausted() {
        let last = segment_file_name(u64::MAX);
        assert_eq!(next_index([last.as_str()]), None);
        assert_eq!(next_index([segment_file_name(u64::MAX - 1)]), Some(u64::MAX));
    }

    #[test]
    fn test_list_segments_sorted_numerically() {
        let tmp = tempdir().unwrap();
        for name in ["audit_10.csv", "audit_2.csv", "audit_0.csv", "readme.md"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }
        fs::create_dir(tmp.path().join("audit_99.csv")).unwrap();

        let segments = list_segments(tmp.path()).unwrap();
        let indices: Vec<u64> = segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2, 10]);
        assert_eq!(segments[2].path, tmp.path().join("audit_10.csv"));
    }

    #[test]
    fn test_list_segments_missing_dir() {
        let tmp = tempdir().unwrap();
        let err = list_segments(&tmp.path().join("missing")).unwrap_err();
        assert!(err.is_storage_failure());
    }
}
