//! parse::log
//!
//! Parsing of delimited `git log` output.
//!
//! # Format Contract
//!
//! The executor asks Git for [`LOG_FORMAT`]: ten fields per commit
//! separated by NUL (`%x00`), each record terminated by SOH (`%x01`).
//! NUL can never appear inside a field, so subjects and bodies may contain
//! any other byte Git will pass through: quotes, newlines, separators
//! from other tools.
//!
//! # Partial Success
//!
//! A record that fails validation is dropped and reported in
//! [`ParsedLog::errors`]; parsing always continues. Callers surface the
//! errors as warnings.

use chrono::{DateTime, FixedOffset};

use crate::core::commit::Commit;
use crate::core::types::{CommitHash, Identity};

/// The exact `git log --format=` specifier this parser consumes.
pub const LOG_FORMAT: &str =
    "%H%x00%P%x00%an%x00%ae%x00%aI%x00%cn%x00%ce%x00%cI%x00%s%x00%b%x01";

/// Field separator within a record (`%x00`).
const FIELD_SEPARATOR: char = '\u{0}';

/// Record terminator (`%x01`).
const RECORD_TERMINATOR: char = '\u{1}';

/// Minimum fields per record; the body (field 10) may be absent.
const MIN_FIELDS: usize = 9;

/// Longest record preview carried on an error, in bytes.
const PREVIEW_LIMIT: usize = 100;

/// What went wrong with a single log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Too few fields to be a commit record
    MalformedRecord,
    /// The commit hash failed validation
    InvalidHash,
    /// An author or commit date was not valid ISO-8601
    InvalidDate,
}

/// A recoverable parse error for one dropped record.
///
/// This is data, not a failure: the surrounding parse keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error category
    pub kind: ParseErrorKind,

    /// Human-readable description
    pub message: String,

    /// Preview of the offending record, truncated to 100 bytes
    pub record: Option<String>,

    /// The field that failed, when one is identifiable
    pub field: Option<&'static str>,
}

/// Result of parsing a log buffer: the commits that survived, plus one
/// error per dropped record.
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    /// Commits in the order Git emitted them
    pub commits: Vec<Commit>,

    /// Errors for records that were dropped
    pub errors: Vec<ParseError>,
}

/// Parse a buffer of [`LOG_FORMAT`] output.
///
/// # Example
///
/// ```
/// use tributary::parse::log::parse_log;
///
/// let hash = "a".repeat(40);
/// let record = format!(
///     "{hash}\u{0}\u{0}Ada\u{0}ada@example.com\u{0}2024-03-01T10:00:00+00:00\
///      \u{0}Ada\u{0}ada@example.com\u{0}2024-03-01T10:00:00+00:00\u{0}subject\u{0}body\u{1}"
/// );
/// let parsed = parse_log(&record);
/// assert_eq!(parsed.commits.len(), 1);
/// assert!(parsed.errors.is_empty());
/// assert_eq!(parsed.commits[0].subject, "subject");
/// ```
pub fn parse_log(buffer: &str) -> ParsedLog {
    let mut parsed = ParsedLog::default();

    for raw in buffer.split(RECORD_TERMINATOR) {
        // Git terminates each record with a newline after the %x01.
        let record = raw.trim_start();
        if record.is_empty() {
            continue;
        }
        match parse_record(record) {
            Ok(commit) => parsed.commits.push(commit),
            Err(error) => parsed.errors.push(error),
        }
    }

    parsed
}

fn parse_record(record: &str) -> Result<Commit, ParseError> {
    let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if fields.len() < MIN_FIELDS {
        return Err(ParseError {
            kind: ParseErrorKind::MalformedRecord,
            message: format!(
                "expected at least {MIN_FIELDS} fields, got {}",
                fields.len()
            ),
            record: Some(preview(record)),
            field: None,
        });
    }

    let hash = fields[0];
    if !CommitHash::is_valid(hash) {
        return Err(ParseError {
            kind: ParseErrorKind::InvalidHash,
            message: format!("invalid commit hash {hash:?}"),
            record: Some(preview(record)),
            field: Some("hash"),
        });
    }
    let hash = CommitHash::new_unchecked(hash);

    // Parents that fail validation are dropped individually rather than
    // failing the record; survivors are normalized to lowercase.
    let parents: Vec<CommitHash> = fields[1]
        .split_whitespace()
        .filter_map(|p| CommitHash::new(p).ok())
        .collect();

    let authored_at = parse_date(fields[4], "author_date", record)?;
    let committed_at = parse_date(fields[7], "commit_date", record)?;

    let body = if fields.len() > MIN_FIELDS {
        fields[MIN_FIELDS..]
            .join("\u{0}")
            .trim()
            .to_string()
    } else {
        String::new()
    };

    Ok(Commit {
        hash,
        parents,
        author: Identity::new(fields[2], fields[3]),
        committer: Identity::new(fields[5], fields[6]),
        authored_at,
        committed_at,
        subject: fields[8].to_string(),
        body,
    })
}

fn parse_date(
    value: &str,
    field: &'static str,
    record: &str,
) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_rfc3339(value).map_err(|e| ParseError {
        kind: ParseErrorKind::InvalidDate,
        message: format!("invalid {field} {value:?}: {e}"),
        record: Some(preview(record)),
        field: Some(field),
    })
}

/// Truncate a record to [`PREVIEW_LIMIT`] bytes on a char boundary.
fn preview(record: &str) -> String {
    if record.len() <= PREVIEW_LIMIT {
        return record.to_string();
    }
    let mut end = PREVIEW_LIMIT;
    while !record.is_char_boundary(end) {
        end -= 1;
    }
    record[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const HASH_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn record(hash: &str, parents: &str, subject: &str, body: &str) -> String {
        format!(
            "{hash}\u{0}{parents}\u{0}Ada\u{0}ada@example.com\
             \u{0}2024-03-01T10:00:00+00:00\u{0}Bob\u{0}bob@example.com\
             \u{0}2024-03-01T10:05:00+00:00\u{0}{subject}\u{0}{body}\u{1}"
        )
    }

    #[test]
    fn single_commit() {
        let parsed = parse_log(&record(HASH_A, "", "first", ""));
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.commits.len(), 1);

        let commit = &parsed.commits[0];
        assert_eq!(commit.hash.as_str(), HASH_A);
        assert!(commit.parents.is_empty());
        assert_eq!(commit.author.name, "Ada");
        assert_eq!(commit.committer.name, "Bob");
        assert_eq!(commit.subject, "first");
        assert_eq!(commit.body, "");
    }

    #[test]
    fn multiple_records_with_interleaved_newlines() {
        // Real git output puts a newline after each %x01.
        let buffer = format!(
            "{}\n{}\n",
            record(HASH_B, HASH_A, "second", ""),
            record(HASH_A, "", "first", "")
        );
        let parsed = parse_log(&buffer);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.commits.len(), 2);
        assert_eq!(parsed.commits[0].parents, vec![
            crate::core::types::CommitHash::new(HASH_A).unwrap()
        ]);
    }

    #[test]
    fn merge_commit_parent_order_preserved() {
        let parents = format!("{HASH_A} {HASH_B}");
        let parsed = parse_log(&record(
            "cccccccccccccccccccccccccccccccccccccccc",
            &parents,
            "merge",
            "",
        ));
        let commit = &parsed.commits[0];
        assert_eq!(commit.parents[0].as_str(), HASH_A);
        assert_eq!(commit.parents[1].as_str(), HASH_B);
        assert!(commit.is_merge());
    }

    #[test]
    fn body_may_contain_field_separator() {
        // A body with embedded NULs comes back rejoined and trimmed.
        let buffer = format!(
            "{HASH_A}\u{0}\u{0}Ada\u{0}a@e.c\u{0}2024-03-01T10:00:00+00:00\
             \u{0}Ada\u{0}a@e.c\u{0}2024-03-01T10:00:00+00:00\u{0}subj\
             \u{0}line one\u{0}line two \u{1}"
        );
        let parsed = parse_log(&buffer);
        assert_eq!(parsed.commits[0].body, "line one\u{0}line two");
    }

    #[test]
    fn body_absent_is_empty() {
        // Exactly nine fields: no body at all.
        let buffer = format!(
            "{HASH_A}\u{0}\u{0}Ada\u{0}a@e.c\u{0}2024-03-01T10:00:00+00:00\
             \u{0}Ada\u{0}a@e.c\u{0}2024-03-01T10:00:00+00:00\u{0}subj\u{1}"
        );
        let parsed = parse_log(&buffer);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.commits[0].body, "");
    }

    #[test]
    fn malformed_record_is_skipped() {
        let buffer = format!("{HASH_A}\u{0}only three\u{0}fields\u{1}");
        let parsed = parse_log(&buffer);
        assert!(parsed.commits.is_empty());
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].kind, ParseErrorKind::MalformedRecord);
        assert!(parsed.errors[0].record.is_some());
    }

    #[test]
    fn invalid_hash_partial_success() {
        let buffer = format!(
            "{}{}",
            record("NOT-A-HASH", "", "bad", ""),
            record(HASH_A, "", "good", "")
        );
        let parsed = parse_log(&buffer);
        assert_eq!(parsed.commits.len(), 1);
        assert_eq!(parsed.commits[0].subject, "good");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].kind, ParseErrorKind::InvalidHash);
        assert_eq!(parsed.errors[0].field, Some("hash"));
    }

    #[test]
    fn invalid_date_drops_record() {
        let buffer = format!(
            "{HASH_A}\u{0}\u{0}Ada\u{0}a@e.c\u{0}not-a-date\
             \u{0}Ada\u{0}a@e.c\u{0}2024-03-01T10:00:00+00:00\u{0}subj\u{0}\u{1}"
        );
        let parsed = parse_log(&buffer);
        assert!(parsed.commits.is_empty());
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].kind, ParseErrorKind::InvalidDate);
        assert_eq!(parsed.errors[0].field, Some("author_date"));
    }

    #[test]
    fn invalid_parent_dropped_not_fatal() {
        let parents = format!("{HASH_A} nothex");
        let parsed = parse_log(&record(HASH_B, &parents, "subject", ""));
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.commits[0].parents.len(), 1);
    }

    #[test]
    fn uppercase_parent_is_lowercased() {
        let parents = HASH_A.to_uppercase();
        let parsed = parse_log(&record(HASH_B, &parents, "subject", ""));
        assert_eq!(parsed.commits[0].parents[0].as_str(), HASH_A);
    }

    #[test]
    fn empty_buffer_yields_nothing() {
        let parsed = parse_log("");
        assert!(parsed.commits.is_empty());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = format!("{}é", "x".repeat(99));
        // 99 ASCII bytes + 2-byte é: byte 100 is mid-char.
        assert_eq!(preview(&long), "x".repeat(99));
        assert_eq!(preview("short"), "short");
    }
}
