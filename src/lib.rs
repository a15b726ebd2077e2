//! Markdown document splitting
//!
//! A single markdown document is split into a directory tree: level-1
//! headings become directories, level-2 and level-3 headings become files,
//! and every directory gets a generated index.

pub mod domain;
pub use domain::{Config, Cursor, Effect, Entry, Line, Section, Slug};

/// Filesystem output, cleanup and the split driver.
pub mod storage;
pub use storage::{Outcome, Report, Sanitizer, SplitError, Splitter};
