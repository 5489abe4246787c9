//! Line Reader
//!
//!     Splits a growable byte buffer into successive lines. Input arrives in arbitrary chunks
//!     through [`LineReader::push`]; [`LineReader::advance`] hands out one complete line at a
//!     time and reports `None` once the buffered input holds no further terminated line.
//!
//!     Bytes after the last `\n` are retained as a partial line. They are only handed out once a
//!     terminator arrives in a later chunk, or once [`LineReader::close`] declares end of input.
//!
//! Incremental Cost
//!
//!     The reader keeps two cursors into its buffer: where the next unread line starts, and how
//!     far the retained partial line has already been searched for a terminator. A push only
//!     searches the newly appended bytes, and consumed lines are compacted away once they make up
//!     at least half of the buffer, so the work per fed byte stays bounded.

use super::error::ScanError;
use super::range::{Position, Span};

/// One line of input, borrowed from the reader's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Line content without its terminator (a trailing `\r` is stripped as well)
    pub text: &'a str,
    /// Absolute byte offset of the first byte of the line
    pub start: usize,
    /// Byte width of the line excluding `\n`
    pub width: usize,
    /// Absolute byte offset just past the line, terminator included
    pub end: usize,
}

impl Line<'_> {
    /// The span covering exactly this line.
    pub fn span(&self) -> Span {
        Span::new(
            self.start..self.end,
            Position::new(self.number, 0),
            Position::new(self.number, self.width),
        )
    }
}

#[derive(Debug, Default)]
pub struct LineReader {
    buffer: Vec<u8>,
    /// Absolute offset of `buffer[0]`
    base: usize,
    /// Index of the first unread byte
    cursor: usize,
    /// Index up to which the unread tail is known to contain no `\n`
    scanned: usize,
    line: usize,
    closed: bool,
    exhausted: bool,
}

impl LineReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of input.
    pub fn push(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.compact();
        self.buffer.extend_from_slice(bytes);
    }

    /// Declare end of input. A non-empty partial line becomes readable.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Number of lines handed out so far
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// True once end of input has been declared and every line has been read.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// True once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Return the next complete line, or `None` when no further line is available yet.
    ///
    /// After [`close`](Self::close) the final unterminated line (if any) is returned, and from
    /// then on every call reports `None`.
    pub fn advance(&mut self) -> Result<Option<Line<'_>>, ScanError> {
        if self.exhausted {
            return Ok(None);
        }

        let from = self.scanned.max(self.cursor);
        let (content_end, next) = match self.buffer[from..].iter().position(|&b| b == b'\n') {
            Some(idx) => (from + idx, from + idx + 1),
            None => {
                self.scanned = self.buffer.len();
                if !self.closed {
                    return Ok(None);
                }
                self.exhausted = true;
                if self.cursor == self.buffer.len() {
                    return Ok(None);
                }
                (self.buffer.len(), self.buffer.len())
            }
        };

        let number = self.line + 1;
        let raw = &self.buffer[self.cursor..content_end];
        let text = std::str::from_utf8(raw).map_err(|e| ScanError::InvalidEncoding {
            line: number,
            column: e.valid_up_to(),
        })?;
        let text = text.strip_suffix('\r').unwrap_or(text);

        let line = Line {
            number,
            text,
            start: self.base + self.cursor,
            width: raw.len(),
            end: self.base + next,
        };
        self.line = number;
        self.cursor = next;
        self.scanned = next;
        Ok(Some(line))
    }

    /// Drop consumed lines from the front of the buffer once they dominate it.
    fn compact(&mut self) {
        if self.cursor == 0 || self.cursor * 2 < self.buffer.len() {
            return;
        }
        self.buffer.drain(..self.cursor);
        self.base += self.cursor;
        self.scanned -= self.cursor;
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(reader: &mut LineReader) -> Vec<(usize, String, usize, usize)> {
        let mut lines = Vec::new();
        while let Some(line) = reader.advance().unwrap() {
            lines.push((line.number, line.text.to_string(), line.start, line.end));
        }
        lines
    }

    #[test]
    fn test_complete_lines() {
        let mut reader = LineReader::new();
        reader.push(b"one\ntwo\n");
        assert_eq!(
            drain(&mut reader),
            vec![
                (1, "one".to_string(), 0, 4),
                (2, "two".to_string(), 4, 8)
            ]
        );
        assert!(!reader.is_exhausted());
    }

    #[test]
    fn test_partial_line_waits_for_more_input() {
        let mut reader = LineReader::new();
        reader.push(b"one\ntw");
        assert_eq!(drain(&mut reader), vec![(1, "one".to_string(), 0, 4)]);

        reader.push(b"o\nthree");
        assert_eq!(drain(&mut reader), vec![(2, "two".to_string(), 4, 8)]);

        reader.close();
        assert_eq!(drain(&mut reader), vec![(3, "three".to_string(), 8, 13)]);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_exhaustion_is_idempotent() {
        let mut reader = LineReader::new();
        reader.push(b"only");
        reader.close();
        assert!(reader.advance().unwrap().is_some());
        assert!(reader.advance().unwrap().is_none());
        assert!(reader.advance().unwrap().is_none());
        assert_eq!(reader.line_number(), 1);
    }

    #[test]
    fn test_trailing_newline_yields_no_empty_line() {
        let mut reader = LineReader::new();
        reader.push(b"a\n");
        reader.close();
        assert_eq!(drain(&mut reader), vec![(1, "a".to_string(), 0, 2)]);
    }

    #[test]
    fn test_blank_lines_are_lines() {
        let mut reader = LineReader::new();
        reader.push(b"\n\nx");
        reader.close();
        let lines = drain(&mut reader);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], (2, String::new(), 1, 2));
    }

    #[test]
    fn test_carriage_return_is_stripped_from_text() {
        let mut reader = LineReader::new();
        reader.push(b"dos\r\nline");
        let line = reader.advance().unwrap().unwrap();
        assert_eq!(line.text, "dos");
        assert_eq!(line.width, 4);
        assert_eq!(line.end, 5);
    }

    #[test]
    fn test_offsets_survive_compaction() {
        let mut reader = LineReader::new();
        reader.push(b"aaaa\nbbbb\n");
        drain(&mut reader);
        reader.push(b"cc\n");
        let line = reader.advance().unwrap().unwrap();
        assert_eq!((line.number, line.start, line.end), (3, 10, 13));
    }

    #[test]
    fn test_split_multibyte_character() {
        let mut reader = LineReader::new();
        let source = "héllo\n".as_bytes();
        reader.push(&source[..2]);
        assert!(reader.advance().unwrap().is_none());
        reader.push(&source[2..]);
        let line = reader.advance().unwrap().unwrap();
        assert_eq!(line.text, "héllo");
        assert_eq!(line.width, 6);
    }

    #[test]
    fn test_invalid_utf8_reports_position() {
        let mut reader = LineReader::new();
        reader.push(b"ok\nab\xffcd\n");
        assert!(reader.advance().unwrap().is_some());
        assert_eq!(
            reader.advance(),
            Err(ScanError::InvalidEncoding { line: 2, column: 2 })
        );
    }

    #[test]
    fn test_line_span() {
        let mut reader = LineReader::new();
        reader.push(b"x\n* Head\n");
        reader.advance().unwrap();
        let line = reader.advance().unwrap().unwrap();
        let span = line.span();
        assert_eq!(span.bytes, 2..9);
        assert_eq!(span.start, Position::new(2, 0));
        assert_eq!(span.end, Position::new(2, 6));
    }
}
