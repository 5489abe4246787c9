//! Position and span tracking for scanned items
//!
//! Every [`Item`](crate::org::item::Item) carries a [`Span`] describing exactly which part of
//! the source it was built from.
//!
//! ## Types
//!
//! - [`Position`] - A line:column position in the source
//! - [`Span`] - A start/end position pair plus the absolute byte range
//!
//! ## Key Design
//!
//! - **Lines are 1-based**, columns are 0-based byte offsets within the line
//! - **Byte ranges include line terminators**: a span's `bytes` covers every `\n` that ends one
//!   of its lines, so the byte ranges of all emitted items tile the input with no gaps
//! - **End column excludes the terminator**: `end.column` is the width of the last line's content

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// Represents a position in source text (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// The source text an item was derived from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub bytes: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(bytes: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { bytes, start, end }
    }

    /// Grow this span so that it ends where `other` ends.
    ///
    /// Used when a multi-line block absorbs the next line.
    pub fn extend_to(&mut self, other: &Span) {
        self.bytes.end = other.bytes.end;
        self.end = other.end;
    }

    /// Number of source lines covered
    pub fn line_count(&self) -> usize {
        self.end.line - self.start.line + 1
    }

    /// True when `other` begins strictly after this span ends.
    pub fn precedes(&self, other: &Span) -> bool {
        self.end < other.start && self.bytes.end <= other.bytes.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
