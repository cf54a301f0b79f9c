use std::io::{BufRead, Seek};

use tracing::debug;

use crate::error::{PropertiesError, Result};
use crate::separator::KeyValueSeparator;
use crate::traits::PropertiesReader;

/// How a line is tested against the requested key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMatch {
    /// The line only has to start with the key. `host` matches a
    /// `hostname=...` line if that line comes first.
    #[default]
    Prefix,
    /// The text before the first separator must equal the key.
    Exact,
}

impl KeyMatch {
    /// Return the value segment of `line` if it matches `key`.
    ///
    /// The value is everything after the first separator, so separators
    /// inside the value are kept as written.
    fn value_of<'a>(&self, line: &'a str, key: &str, token: &str) -> Option<&'a str> {
        match self {
            KeyMatch::Prefix => {
                if !line.starts_with(key) {
                    return None;
                }
                line.split_once(token).map(|(_, value)| value)
            }
            KeyMatch::Exact => line
                .split_once(token)
                .filter(|(k, _)| *k == key)
                .map(|(_, value)| value),
        }
    }
}

/// Reject keys that can never be looked up.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(PropertiesError::InvalidKey("key must not be empty".to_string()));
    }
    if key.starts_with(' ') {
        return Err(PropertiesError::InvalidKey(format!(
            "key must not start with ' ': {:?}",
            key
        )));
    }
    Ok(())
}

/// LineScanner looks up keys in a `<key><separator><value>` line stream.
///
/// Each lookup reads from the start of the stream and rewinds it before
/// returning, whatever the outcome, so no lookup sees a position left by
/// another. The reader must be positioned at its start when handed over.
pub struct LineScanner<R> {
    reader: R,
    separator: KeyValueSeparator,
    key_match: KeyMatch,
}

impl<R: BufRead + Seek> LineScanner<R> {
    pub fn new(reader: R, separator: KeyValueSeparator) -> Self {
        Self {
            reader,
            separator,
            key_match: KeyMatch::default(),
        }
    }

    pub fn with_key_match(mut self, key_match: KeyMatch) -> Self {
        self.key_match = key_match;
        self
    }

    pub fn separator(&self) -> KeyValueSeparator {
        self.separator
    }

    pub fn key_match(&self) -> KeyMatch {
        self.key_match
    }

    /// Find the value segment of the first line matching `key`.
    pub fn find_line(&mut self, key: &str) -> Result<String> {
        validate_key(key)?;

        let found = self.scan(key);
        self.reader
            .rewind()
            .map_err(|e| PropertiesError::Io(e.to_string()))?;
        found
    }

    fn scan(&mut self, key: &str) -> Result<String> {
        let token = self.separator.token();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| PropertiesError::Io(e.to_string()))?;
            if read == 0 {
                break;
            }

            // Malformed bytes become U+FFFD instead of failing the scan.
            let chunk = String::from_utf8_lossy(&buf);
            for line in split_lines(&chunk) {
                if let Some(value) = self.key_match.value_of(line, key, token) {
                    return Ok(value.to_string());
                }
            }
        }

        debug!("LineScanner: no line for key {:?} with separator {:?}", key, token);
        Err(PropertiesError::KeyNotFound {
            key: key.to_string(),
            separator: token.to_string(),
        })
    }
}

impl<R: BufRead + Seek> PropertiesReader for LineScanner<R> {
    fn find_value(&mut self, key: &str) -> Result<String> {
        self.find_line(key)
    }
}

/// Split a chunk ending at `\n` (or at end of stream) into lines. A line
/// ends at `\n`, `\r\n` or a lone `\r`.
fn split_lines(chunk: &str) -> std::str::Split<'_, char> {
    let chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
    let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
    chunk.split('\r')
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn scanner(text: &str, separator: KeyValueSeparator) -> LineScanner<Cursor<Vec<u8>>> {
        LineScanner::new(Cursor::new(text.as_bytes().to_vec()), separator)
    }

    fn position(s: &mut LineScanner<Cursor<Vec<u8>>>) -> u64 {
        s.reader.stream_position().unwrap()
    }

    // ========================================================================
    // Key validation
    // ========================================================================

    #[test]
    fn empty_key_is_invalid() {
        let mut s = scanner("=x\n", KeyValueSeparator::Equals);
        assert!(matches!(s.find_line(""), Err(PropertiesError::InvalidKey(_))));
    }

    #[test]
    fn key_starting_with_space_is_invalid() {
        let mut s = scanner(" a=x\n", KeyValueSeparator::Equals);
        assert!(matches!(s.find_line(" a"), Err(PropertiesError::InvalidKey(_))));
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[test]
    fn finds_value() {
        let mut s = scanner("name=John\nage=42\n", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("name").unwrap(), "John");
        assert_eq!(s.find_line("age").unwrap(), "42");
    }

    #[test]
    fn last_line_without_newline() {
        let mut s = scanner("a=1\nb=2", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("b").unwrap(), "2");
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let mut s = scanner("a=1\r\nb=2\r\n", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("a").unwrap(), "1");
        assert_eq!(s.find_line("b").unwrap(), "2");
    }

    #[test]
    fn value_keeps_inner_separators() {
        let mut s = scanner("url=a=b=c\nempty=\ntrail=x=\n", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("url").unwrap(), "a=b=c");
        assert_eq!(s.find_line("empty").unwrap(), "");
        assert_eq!(s.find_line("trail").unwrap(), "x=");
    }

    #[test]
    fn multi_char_separator() {
        let mut s = scanner("route->a->b\nx-y->1\n", KeyValueSeparator::Arrow);
        assert_eq!(s.find_line("route").unwrap(), "a->b");
        assert_eq!(s.find_line("x-y").unwrap(), "1");
    }

    #[test]
    fn blank_and_unrelated_lines_are_skipped() {
        let mut s = scanner("\n\nfoo\nother:1\nkey:v\n", KeyValueSeparator::Colon);
        assert_eq!(s.find_line("key").unwrap(), "v");
    }

    #[test]
    fn first_duplicate_wins() {
        let mut s = scanner("k=first\nk=second\n", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("k").unwrap(), "first");
    }

    #[test]
    fn matching_line_without_separator_is_skipped() {
        let mut s = scanner("key only\nkey=later\n", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("key").unwrap(), "later");
    }

    #[test]
    fn missing_key_reports_key_and_separator() {
        let mut s = scanner("a:1\n", KeyValueSeparator::Colon);
        match s.find_line("b").unwrap_err() {
            PropertiesError::KeyNotFound { key, separator } => {
                assert_eq!(key, "b");
                assert_eq!(separator, ":");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn key_present_but_wrong_separator_is_not_found() {
        let mut s = scanner("a=1\n", KeyValueSeparator::Colon);
        assert!(matches!(s.find_line("a"), Err(PropertiesError::KeyNotFound { .. })));
    }

    #[test]
    fn empty_stream_is_not_found() {
        let mut s = scanner("", KeyValueSeparator::Equals);
        assert!(matches!(s.find_line("a"), Err(PropertiesError::KeyNotFound { .. })));
    }

    // ========================================================================
    // Key matching policy
    // ========================================================================

    #[test]
    fn prefix_match_hits_longer_key_first() {
        let mut s = scanner("hostname=box\nhost=10.0.0.1\n", KeyValueSeparator::Equals);
        assert_eq!(s.key_match(), KeyMatch::Prefix);
        assert_eq!(s.find_line("host").unwrap(), "box");
    }

    #[test]
    fn exact_match_skips_longer_key() {
        let mut s = scanner("hostname=box\nhost=10.0.0.1\n", KeyValueSeparator::Equals)
            .with_key_match(KeyMatch::Exact);
        assert_eq!(s.find_line("host").unwrap(), "10.0.0.1");
        assert_eq!(s.find_line("hostname").unwrap(), "box");
        assert!(s.find_line("hos").is_err());
    }

    // ========================================================================
    // Cursor reset
    // ========================================================================

    #[test]
    fn cursor_rewound_after_hit_and_miss() {
        let mut s = scanner("a=1\nb=2\n", KeyValueSeparator::Equals);
        s.find_line("b").unwrap();
        assert_eq!(position(&mut s), 0);
        s.find_line("zzz").unwrap_err();
        assert_eq!(position(&mut s), 0);
    }

    #[test]
    fn earlier_key_found_after_later_lookup() {
        let mut s = scanner("a=1\nb=2\n", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("b").unwrap(), "2");
        assert_eq!(s.find_line("a").unwrap(), "1");
    }

    #[test]
    fn repeated_lookups_are_idempotent() {
        let mut s = scanner("a=1\nb=2\n", KeyValueSeparator::Equals);
        for _ in 0..5 {
            assert_eq!(s.find_line("a").unwrap(), "1");
            assert!(s.find_line("c").is_err());
        }
    }

    #[test]
    fn lone_carriage_return_ends_a_line() {
        let mut s = scanner("a=1\rb=2\r", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("a").unwrap(), "1");
        assert_eq!(s.find_line("b").unwrap(), "2");

        let mut s = scanner("x=1\r\ry=2\r\nz=3\n", KeyValueSeparator::Equals);
        assert_eq!(s.find_line("y").unwrap(), "2");
        assert_eq!(s.find_line("z").unwrap(), "3");
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut bytes = b"junk".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"name=John\n");
        let mut s = LineScanner::new(Cursor::new(bytes), KeyValueSeparator::Equals);

        assert_eq!(s.find_line("name").unwrap(), "John");
        assert_eq!(position(&mut s), 0);
        assert!(matches!(s.find_line("junk"), Err(PropertiesError::KeyNotFound { .. })));
    }

    #[test]
    fn invalid_utf8_in_value_is_replaced() {
        let mut bytes = b"a=x".to_vec();
        bytes.extend_from_slice(&[0xff, b'y', b'\n']);
        let mut s = LineScanner::new(Cursor::new(bytes), KeyValueSeparator::Equals);

        assert_eq!(s.find_line("a").unwrap(), "x\u{FFFD}y");
    }
}
