//! Rendering of navigation index files.

use std::fmt::Write as _;

use crate::domain::Entry;

/// Renders entries as a markdown list of links, one row per entry.
///
/// Returns `None` when there is nothing to list; no index file should be
/// written in that case.
#[must_use]
pub fn render<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Option<String> {
    let mut out = String::new();
    for Entry { target, title } in entries {
        writeln!(out, "- [{title}]({target})").expect("writing to a String cannot fail");
    }
    (!out.is_empty()).then_some(out)
}
