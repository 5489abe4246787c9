//! Scanner
//!
//! Couples the [`LineReader`] with the [`Accumulator`]. Input is fed in chunks of any size; each
//! feed processes only the complete lines that are available and returns the items they
//! finalized. [`Scanner::finish`] reads the retained partial line and flushes the open block.
//!
//! ```text
//! let mut scanner = Scanner::new();
//! let mut items = scanner.feed_str("#+TITLE: Blog\n* Intro\nSome te")?;
//! items.extend(scanner.feed_str("xt\n")?);
//! items.extend(scanner.finish()?);
//! ```
//!
//! Splitting the same input at different chunk boundaries always yields the same items.
//!
//! Stepping
//!
//!     `feed` and `finish` are built on a line-at-a-time API: [`Scanner::push`] buffers input,
//!     [`Scanner::end_input`] declares that no more will come, and [`Scanner::step`] consumes one
//!     line. Producers that hand items to a slower consumer drive `step` directly so they never
//!     scan further ahead than the consumer allows.
//!
//! Encoding Errors
//!
//!     A line that is not valid UTF-8 stops scanning at that line. Items finalized by earlier
//!     lines are always delivered first: `feed` returns them and reports the error on the next
//!     call, since the reader does not move past the bad line.
use super::accumulator::{Accumulator, Emitted};
use super::error::ScanError;
use super::item::Item;
use super::reader::LineReader;

#[derive(Debug, Default)]
pub struct Scanner {
    reader: LineReader,
    accumulator: Accumulator,
    finished: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and parse every complete line it makes available.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Item>, ScanError> {
        self.push(chunk)?;
        let mut items = Vec::new();
        loop {
            match self.step() {
                Ok(Some(emitted)) => items.extend(emitted),
                Ok(None) => return Ok(items),
                Err(err) if items.is_empty() => return Err(err),
                Err(err) => {
                    log::debug!("returning {} items ahead of: {}", items.len(), err);
                    return Ok(items);
                }
            }
        }
    }

    pub fn feed_str(&mut self, chunk: &str) -> Result<Vec<Item>, ScanError> {
        self.feed(chunk.as_bytes())
    }

    /// Declare end of input: parse the retained partial line and close the open block.
    ///
    /// Calling this again returns no further items.
    pub fn finish(&mut self) -> Result<Vec<Item>, ScanError> {
        self.end_input();
        let mut items = Vec::new();
        while let Some(emitted) = self.step()? {
            items.extend(emitted);
        }
        Ok(items)
    }

    /// Buffer a chunk without scanning it.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), ScanError> {
        if self.finished || self.reader.is_closed() {
            return Err(ScanError::Finished);
        }
        self.reader.push(chunk);
        Ok(())
    }

    /// Declare that no more input will be pushed.
    pub fn end_input(&mut self) {
        self.reader.close();
    }

    /// Scan a single line and return what it finalized, which may be nothing.
    ///
    /// Returns `None` when no complete line is buffered. After [`end_input`](Self::end_input)
    /// the last successful step flushes the open block, and every later step returns `None`.
    pub fn step(&mut self) -> Result<Option<Emitted>, ScanError> {
        if self.finished {
            return Ok(None);
        }
        if let Some(line) = self.reader.advance()? {
            return Ok(Some(self.accumulator.push_line(&line)));
        }
        if !self.reader.is_exhausted() {
            return Ok(None);
        }
        self.finished = true;
        log::debug!("scan finished after {} lines", self.reader.line_number());
        Ok(Some(Emitted {
            closed: self.accumulator.flush(),
            item: None,
        }))
    }

    /// Return to the initial state, discarding buffered input and any open block.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn lines_read(&self) -> usize {
        self.reader.line_number()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Scan a complete document in one go.
pub fn scan(source: &str) -> Result<Vec<Item>, ScanError> {
    let mut scanner = Scanner::new();
    let mut items = scanner.feed_str(source)?;
    items.extend(scanner.finish()?);
    Ok(items)
}
