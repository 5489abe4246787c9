//! Main module for orgscan library functionality
//!
//! The scanning pipeline, leaves first:
//!
//! - [`reader`]: splits buffered input into lines
//! - [`classify`]: keyword, comment and headline recognition for one line
//! - [`accumulator`]: the state machine that merges lines into items
//! - [`scanner`]: reader and accumulator behind a feed/finish API
//! - [`stream`]: bounded hand-off of items from a producer task
//!
//! [`loader`], [`formats`] and [`config`] sit on top for applications.

pub mod accumulator;
pub mod classify;
pub mod config;
pub mod error;
pub mod formats;
pub mod item;
pub mod loader;
pub mod range;
pub mod reader;
pub mod scanner;
pub mod stream;

pub use error::{FormatError, LoaderError, ScanError};
pub use item::{Item, ItemKind};
pub use loader::DocumentLoader;
pub use range::{Position, Span};
pub use scanner::{scan, Scanner};
pub use stream::{ItemStream, ScanReport};
