//! # orgscan
//!
//! An incremental scanner for org-style outline documents.
//!
//! Source text goes in, in one piece or in arbitrary chunks; an ordered sequence of span-tagged
//! items comes out. Four kinds of item are produced: headlines, `#+KEY: value` keywords,
//! comments and plain text. Consecutive comment or text lines merge into a single item.
//!
//! File Layout
//!
//! src/org
//!   ├── reader, classify, accumulator, scanner   The scanning core
//!   ├── stream                                   Bounded producer/consumer hand-off
//!   └── loader, formats, config                  Application-facing helpers
//!
//! Rendering scanned items into pages is left to the caller.

pub mod org;
