use std::path::{Path, PathBuf};

/// One row of an index: a link target and its display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Link target, relative to the directory the index lives in.
    pub target: String,
    /// Link text, the heading title verbatim.
    pub title: String,
}

impl Entry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(target: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            title: title.into(),
        }
    }
}

/// The entries of a single index.
///
/// The introduction has its own slot and is always yielded first, however
/// late it was recorded. Heading entries keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    introduction: Option<Entry>,
    headings: Vec<Entry>,
}

impl Entries {
    /// Records the introduction entry.
    ///
    /// Returns `false` (and leaves the slot untouched) if an introduction
    /// was already recorded.
    pub fn set_introduction(&mut self, entry: Entry) -> bool {
        if self.introduction.is_some() {
            return false;
        }
        self.introduction = Some(entry);
        true
    }

    /// Appends a heading-derived entry.
    pub fn push(&mut self, entry: Entry) {
        self.headings.push(entry);
    }

    /// All entries in index order: introduction first, then headings.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.introduction.iter().chain(&self.headings)
    }

    /// Number of entries, introduction included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headings.len() + usize::from(self.introduction.is_some())
    }

    /// Whether there is nothing to index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.introduction.is_none() && self.headings.is_empty()
    }

    /// Moves every entry of `other` in front of the current headings.
    ///
    /// `other`'s introduction takes the introduction slot if it is free.
    pub fn prepend(&mut self, other: Self) {
        if let Some(intro) = other.introduction {
            self.set_introduction(intro);
        }
        let headings = std::mem::take(&mut self.headings);
        self.headings = other.headings;
        self.headings.extend(headings);
    }
}

/// The scope of one level-1 heading, mapped to one output directory.
///
/// The root section has an empty directory path and no title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    dir: PathBuf,
    title: Option<String>,
    entries: Entries,
}

impl Section {
    /// The implicit section rooted at the output directory.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A section for the directory `dir`, relative to the output root.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            title: Some(title.into()),
            entries: Entries::default(),
        }
    }

    /// Directory relative to the output root.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The heading title, `None` for the root section.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The entries recorded so far.
    #[must_use]
    pub const fn entries(&self) -> &Entries {
        &self.entries
    }

    /// Mutable access to the entries.
    pub fn entries_mut(&mut self) -> &mut Entries {
        &mut self.entries
    }
}
