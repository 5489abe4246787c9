//! Document loading utilities
//!
//! `DocumentLoader` reads a whole source document into memory and feeds it to the scanner in
//! fixed-size chunks, either synchronously ([`DocumentLoader::scan`]) or through a bounded
//! [`ItemStream`] ([`DocumentLoader::stream`]). It is the entry point used by the CLI and by
//! anything that renders scanned content.
//!
//! ```text
//! let items = DocumentLoader::from_path("content/homepage.org")?.scan()?;
//!
//! let mut stream = DocumentLoader::from_string(source).with_chunk_size(4096).stream(64);
//! while let Some(item) = stream.next().await { ... }
//! let report = stream.join().await?;
//! ```

use super::error::LoaderError;
use super::item::Item;
use super::scanner::Scanner;
use super::stream::ItemStream;
use std::fs;
use std::path::Path;

pub const DEFAULT_CHUNK_SIZE: usize = 8192;

#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: Vec<u8>,
    chunk_size: usize,
}

impl DocumentLoader {
    /// Load from a file path. The bytes are validated line by line while scanning.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded {} ({} bytes)", path.display(), source.len());
        Ok(Self::from_bytes(source))
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        Self::from_bytes(source.into().into_bytes())
    }

    pub fn from_bytes(source: Vec<u8>) -> Self {
        DocumentLoader {
            source,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Feed the scanner in chunks of `chunk_size` bytes (minimum one).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn source_ref(&self) -> &[u8] {
        &self.source
    }

    /// Scan the whole document synchronously.
    pub fn scan(&self) -> Result<Vec<Item>, LoaderError> {
        let mut scanner = Scanner::new();
        let mut items = Vec::new();
        for chunk in self.source.chunks(self.chunk_size) {
            items.extend(scanner.feed(chunk)?);
        }
        items.extend(scanner.finish()?);
        Ok(items)
    }

    /// Scan on a background task, handing items over through a bounded stream.
    ///
    /// Requires a tokio runtime.
    pub fn stream(self, capacity: usize) -> ItemStream {
        let chunk_size = self.chunk_size;
        let chunks: Vec<Vec<u8>> = self
            .source
            .chunks(chunk_size)
            .map(<[u8]>::to_vec)
            .collect();
        ItemStream::spawn(chunks, capacity)
    }
}
