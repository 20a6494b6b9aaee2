//! Instance counting for ARFF stream files.
//!
//! An ARFF file carries a header (`@relation`, `@attribute ...`) followed by a
//! data section introduced by a line reading `@data`. Only the data section is
//! counted: blank lines and `%` comments are ignored.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Marker line that opens the data section (matched case-insensitively)
pub const DATA_SENTINEL: &[u8] = b"@data";

/// First byte of an ARFF comment line
pub const COMMENT_MARKER: u8 = b'%';

/// Outcome of scanning an ARFF file.
///
/// Every variant other than `Counted` means "skip this dataset"; they are kept
/// apart so logs can say why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceCount {
    Counted(u64),
    /// The file has no `@data` line
    MissingDataSection,
    NotFound,
    /// Open or read failed for a reason other than absence (permissions, ...)
    Unreadable(String),
}

impl InstanceCount {
    /// The count, or `None` for any failure.
    pub fn instances(&self) -> Option<u64> {
        match self {
            InstanceCount::Counted(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for InstanceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceCount::Counted(n) => write!(f, "{n} instances"),
            InstanceCount::MissingDataSection => write!(f, "no @data section"),
            InstanceCount::NotFound => write!(f, "file not found"),
            InstanceCount::Unreadable(reason) => write!(f, "unreadable: {reason}"),
        }
    }
}

/// Count data rows read from `reader`, or `Ok(None)` if there is no data
/// sentinel.
///
/// Lines are handled as raw bytes, so header comments or nominal values in a
/// non-UTF-8 encoding (Latin-1 is common) do not affect the count. Only one
/// line is held in memory at a time.
pub fn count_data_rows<R: BufRead>(mut reader: R) -> io::Result<Option<u64>> {
    let mut line = Vec::new();
    let mut in_data = false;
    let mut rows = 0;

    while reader.read_until(b'\n', &mut line)? > 0 {
        let trimmed = line.trim_ascii();
        if !in_data {
            in_data = trimmed.eq_ignore_ascii_case(DATA_SENTINEL);
        } else if !trimmed.is_empty() && !trimmed.starts_with(&[COMMENT_MARKER]) {
            rows += 1;
        }
        line.clear();
    }

    Ok(in_data.then_some(rows))
}

/// Scan the ARFF file at `path` and count its data rows.
///
/// Failures are logged here with distinct messages so callers only need to
/// decide whether to skip.
pub fn count_instances(path: &Path) -> InstanceCount {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Dataset file couldn't be opened, skipping");
            return InstanceCount::NotFound;
        }
        Err(e) => return unreadable(path, e),
    };

    match count_data_rows(BufReader::new(file)) {
        Ok(Some(rows)) => {
            tracing::debug!(path = %path.display(), rows, "Counted dataset instances");
            InstanceCount::Counted(rows)
        }
        Ok(None) => {
            tracing::warn!(
                path = %path.display(),
                "File without ARFF format (no @data line), skipping"
            );
            InstanceCount::MissingDataSection
        }
        Err(e) => unreadable(path, e),
    }
}

fn unreadable(path: &Path, e: io::Error) -> InstanceCount {
    tracing::warn!(path = %path.display(), error = %e, "Dataset file unreadable, skipping");
    InstanceCount::Unreadable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;
    use tracing_subscriber::fmt::MakeWriter;

    const HEADER: &str = "@relation test\n@attribute a numeric\n@attribute class {0,1}\n";

    fn rows(content: impl AsRef<[u8]>) -> Option<u64> {
        count_data_rows(content.as_ref()).unwrap()
    }

    /// Shared buffer the test subscriber formats into
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` with a warn-level subscriber installed and return what it logged.
    fn with_captured_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
        (value, text)
    }

    #[test]
    fn test_counts_rows_skipping_blank_lines() {
        let content = format!("{HEADER}@data\n1,0\n2,1\n\n3,0\n4,1\n\n5,0\n");
        assert_eq!(rows(content), Some(5));
    }

    #[test]
    fn test_sentinel_is_case_insensitive_and_trimmed() {
        let content = format!("{HEADER}   @DATA  \n1,0\n2,1\n");
        assert_eq!(rows(content), Some(2));
    }

    #[test]
    fn test_comments_are_not_counted() {
        let content = format!("{HEADER}@data\n% a comment\n1,0\n  % indented comment\n2,1\n");
        assert_eq!(rows(content), Some(2));
    }

    #[test]
    fn test_header_rows_are_not_counted() {
        let content = "@relation r\n% header comment\n@attribute x numeric\n@data\n7\n";
        assert_eq!(rows(content), Some(1));
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        let content = "@data\n1\n   \n\t\n2\n";
        assert_eq!(rows(content), Some(2));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "@relation r\r\n@data\r\n1,0\r\n\r\n2,1\r\n";
        assert_eq!(rows(content), Some(2));
    }

    #[test]
    fn test_last_row_without_newline() {
        assert_eq!(rows("@data\n1,0\n2,1"), Some(2));
    }

    #[test]
    fn test_missing_sentinel() {
        let content = format!("{HEADER}1,0\n2,1\n");
        assert_eq!(rows(content), None);
    }

    #[test]
    fn test_empty_data_section_is_zero_not_failure() {
        assert_eq!(rows("@data\n\n"), Some(0));
    }

    #[test]
    fn test_non_utf8_bytes_are_counted() {
        let mut content = b"@relation r\n% autor: Jos\xe9\n@attribute c {a,b,\xe7}\n".to_vec();
        content.extend_from_slice(b"@data\na\n\xe7\n% coment\xe1rio\nb\n");
        assert_eq!(rows(&content), Some(3));
    }

    #[test]
    fn test_count_instances_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stream.arff");
        fs::write(&path, format!("{HEADER}@data\n1,0\n2,1\n3,0\n")).unwrap();

        assert_eq!(count_instances(&path), InstanceCount::Counted(3));
    }

    #[test]
    fn test_count_instances_latin1_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.arff");
        let mut content = b"@relation r\n% autor: Jos\xe9\n@attribute c {a,b}\n@data\n".to_vec();
        for _ in 0..54 {
            content.extend_from_slice(b"a\n");
        }
        content.extend_from_slice(b"b % S\xe3o Paulo\n");
        fs::write(&path, content).unwrap();

        assert_eq!(count_instances(&path), InstanceCount::Counted(55));
    }

    #[cfg(unix)]
    #[test]
    fn test_count_instances_read_failure_is_unreadable() {
        // Opening a directory succeeds on unix; reading from it does not
        let dir = tempdir().unwrap();
        let (result, logs) = with_captured_warnings(|| count_instances(dir.path()));

        assert!(matches!(result, InstanceCount::Unreadable(_)));
        assert!(logs.contains("Dataset file unreadable, skipping"));
    }

    #[test]
    fn test_malformed_and_missing_files_log_different_warnings() {
        let dir = tempdir().unwrap();
        let malformed = dir.path().join("plain.csv");
        fs::write(&malformed, "a,b\n1,2\n").unwrap();
        let missing = dir.path().join("absent.arff");

        let (malformed_result, malformed_logs) =
            with_captured_warnings(|| count_instances(&malformed));
        let (missing_result, missing_logs) = with_captured_warnings(|| count_instances(&missing));

        assert_eq!(malformed_result, InstanceCount::MissingDataSection);
        assert_eq!(missing_result, InstanceCount::NotFound);
        assert_eq!(malformed_result.instances(), None);
        assert_eq!(missing_result.instances(), None);

        assert!(malformed_logs.contains("WARN"));
        assert!(malformed_logs.contains("no @data line"));
        assert!(malformed_logs.contains("plain.csv"));
        assert!(missing_logs.contains("WARN"));
        assert!(missing_logs.contains("couldn't be opened"));
        assert!(missing_logs.contains("absent.arff"));
        assert!(!missing_logs.contains("no @data line"));
        assert!(!malformed_logs.contains("couldn't be opened"));
    }
}
