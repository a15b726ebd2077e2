use std::{fmt, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::Regex;

/// Fallback used when a title contains nothing usable.
pub const UNTITLED: &str = "untitled";

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-]").expect("this must never fail"));

static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("this must never fail"));

/// A filesystem-safe identifier derived from a heading title.
///
/// Slugs contain only `[a-z0-9_-]`, never start or end with `_`, and are
/// never empty. Two different titles may share a slug; nothing here
/// enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Slug(NonEmptyString);

impl Slug {
    /// Derives a slug from a heading title.
    ///
    /// The title is trimmed and lowercased, every character outside
    /// `[a-z0-9-]` becomes `_`, runs of `_` collapse to one, and leading or
    /// trailing `_` are removed. Hyphens are kept as they are.
    #[must_use]
    pub fn new(title: &str) -> Self {
        let lowered = title.trim().to_lowercase();
        let replaced = DISALLOWED.replace_all(&lowered, "_");
        let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");

        let slug = NonEmptyString::new(collapsed.trim_matches('_').to_string())
            .unwrap_or_else(|_| {
                NonEmptyString::new(UNTITLED.to_string()).expect("this must never fail")
            });

        Self(slug)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The markdown file name for this slug, e.g. `getting_started.md`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.md", self.as_str())
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
