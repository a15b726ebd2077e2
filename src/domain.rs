//! Domain model for splitting a markdown document.
//!
//! This module contains the pure parts of a split: line classification,
//! slugs, sections and their index entries, configuration, and the cursor
//! state machine that turns lines into filesystem effects.

mod config;
pub use config::Config;

/// Directory/file cursor state machine.
pub mod cursor;
pub use cursor::{Cursor, Effect};

mod line;
pub use line::Line;

/// Sections and index entries.
pub mod section;
pub use section::{Entries, Entry, Section};

mod slug;
pub use slug::{Slug, UNTITLED};
