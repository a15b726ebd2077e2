//! The directory/file cursor.
//!
//! The [`Cursor`] consumes classified lines one at a time and decides which
//! directories and files to create, which lines go where, and when an index
//! is due. It performs no I/O: every transition returns the list of
//! [`Effect`]s to apply, in order.

use std::path::PathBuf;

use crate::domain::{
    Config, Line, Slug,
    section::{Entries, Entry, Section},
};

/// A filesystem action requested by the [`Cursor`].
///
/// Paths are relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<'a> {
    /// Create a directory. Creating an existing directory is not an error.
    CreateDir(PathBuf),

    /// Create (or truncate) a file and make it the open file.
    ///
    /// Always preceded by [`Effect::CloseFile`] when another file is open.
    OpenFile(PathBuf),

    /// Append text verbatim to the open file.
    Write(&'a str),

    /// Flush and close the open file.
    CloseFile,

    /// Write an index file listing `entries`, one row each.
    RenderIndex {
        /// Path of the index file.
        path: PathBuf,
        /// Title of the section being indexed, `None` for the root.
        title: Option<String>,
        /// Rows in index order.
        entries: Vec<Entry>,
    },
}

/// Streaming state for one split.
///
/// At most one section and one file are open at any time. Before the first
/// level-1 heading the cursor is "at root": files land in the output root
/// and their entries form the preamble.
#[derive(Debug)]
pub struct Cursor {
    config: Config,
    root: Section,
    preamble: Entries,
    section: Option<Section>,
    open_file: Option<PathBuf>,
}

impl Cursor {
    /// Creates a cursor positioned at the output root.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            root: Section::root(),
            preamble: Entries::default(),
            section: None,
            open_file: None,
        }
    }

    /// Feeds one classified line, returning the effects it triggers.
    pub fn advance<'a>(&mut self, line: Line<'a>) -> Vec<Effect<'a>> {
        let mut effects = Vec::new();

        match (self.section.is_some(), line) {
            (in_section, Line::Heading1 { title }) => {
                if in_section {
                    self.finalize_section(&mut effects);
                } else {
                    self.resolve_preamble();
                }
                self.open_section(title, &mut effects);
            }
            (_, Line::HeadingSub { title, raw }) => {
                let slug = Slug::new(title);
                let file_name = slug.file_name();
                self.open(self.current_dir().join(&file_name), &mut effects);
                effects.push(Effect::Write(raw));
                self.current_entries().push(Entry::new(file_name, title));
            }
            (_, Line::Content(text)) if self.open_file.is_none() => {
                if line.is_blank() {
                    return effects;
                }
                let path = self.current_dir().join(self.config.introduction_file());
                self.open(path, &mut effects);
                let entry = Entry::new(
                    self.config.introduction_file(),
                    self.config.introduction_title(),
                );
                self.current_entries().set_introduction(entry);
                effects.push(Effect::Write(text));
            }
            (_, Line::Content(text)) => effects.push(Effect::Write(text)),
        }

        effects
    }

    /// Ends the input, returning the closing effects.
    ///
    /// Closes the open file, indexes the open section, and finally indexes
    /// the root.
    #[must_use]
    pub fn finish(mut self) -> Vec<Effect<'static>> {
        let mut effects = Vec::new();

        self.close(&mut effects);
        if self.section.is_some() {
            self.finalize_section(&mut effects);
        } else {
            self.resolve_preamble();
        }

        let path = PathBuf::from(self.config.index_file());
        push_index(&mut effects, path, None, self.root.entries());

        effects
    }

    fn open_section(&mut self, title: &str, effects: &mut Vec<Effect<'_>>) {
        let slug = Slug::new(title);
        let dir = PathBuf::from(slug.as_str());

        effects.push(Effect::CreateDir(dir.clone()));
        self.root.entries_mut().push(Entry::new(
            format!("{slug}/{}", self.config.index_file()),
            title,
        ));
        self.close(effects);
        self.section = Some(Section::new(dir, title));
    }

    fn finalize_section(&mut self, effects: &mut Vec<Effect<'_>>) {
        if let Some(section) = self.section.take() {
            let path = section.dir().join(self.config.index_file());
            push_index(effects, path, section.title(), section.entries());
        }
    }

    /// Folds the preamble into the root index, or drops it.
    fn resolve_preamble(&mut self) {
        let preamble = std::mem::take(&mut self.preamble);
        if preamble.is_empty() {
            return;
        }
        if self.config.index_preamble {
            self.root.entries_mut().prepend(preamble);
        } else {
            tracing::debug!(
                "Not indexing {} entries found before the first level-1 heading",
                preamble.len()
            );
        }
    }

    fn open(&mut self, path: PathBuf, effects: &mut Vec<Effect<'_>>) {
        self.close(effects);
        effects.push(Effect::OpenFile(path.clone()));
        self.open_file = Some(path);
    }

    fn close(&mut self, effects: &mut Vec<Effect<'_>>) {
        if self.open_file.take().is_some() {
            effects.push(Effect::CloseFile);
        }
    }

    fn current_dir(&self) -> PathBuf {
        self.section
            .as_ref()
            .map_or_else(PathBuf::new, |section| section.dir().to_path_buf())
    }

    fn current_entries(&mut self) -> &mut Entries {
        match &mut self.section {
            Some(section) => section.entries_mut(),
            None => &mut self.preamble,
        }
    }
}

fn push_index(
    effects: &mut Vec<Effect<'_>>,
    path: PathBuf,
    title: Option<&str>,
    entries: &Entries,
) {
    if entries.is_empty() {
        return;
    }
    effects.push(Effect::RenderIndex {
        path,
        title: title.map(str::to_string),
        entries: entries.iter().cloned().collect(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: Config, input: &str) -> Vec<Effect<'_>> {
        let mut cursor = Cursor::new(config);
        let mut effects: Vec<_> = input
            .split_inclusive('\n')
            .flat_map(|line| cursor.advance(Line::classify(line)))
            .collect();
        effects.extend(cursor.finish());
        effects
    }

    fn index(path: &str, title: Option<&str>, entries: &[(&str, &str)]) -> Effect<'static> {
        Effect::RenderIndex {
            path: PathBuf::from(path),
            title: title.map(str::to_string),
            entries: entries
                .iter()
                .map(|(target, title)| Entry::new(*target, *title))
                .collect(),
        }
    }

    #[test]
    fn structural_mapping() {
        let input = "# Intro\nSome text.\n## First\ncontent A\n# Second\n## Only\ncontent B\n";

        let effects = run(Config::default(), input);

        assert_eq!(
            effects,
            vec![
                Effect::CreateDir("intro".into()),
                Effect::OpenFile("intro/introduction.md".into()),
                Effect::Write("Some text.\n"),
                Effect::CloseFile,
                Effect::OpenFile("intro/first.md".into()),
                Effect::Write("## First\n"),
                Effect::Write("content A\n"),
                index(
                    "intro/index.md",
                    Some("Intro"),
                    &[("introduction.md", "Introduction"), ("first.md", "First")]
                ),
                Effect::CreateDir("second".into()),
                Effect::CloseFile,
                Effect::OpenFile("second/only.md".into()),
                Effect::Write("## Only\n"),
                Effect::Write("content B\n"),
                Effect::CloseFile,
                index("second/index.md", Some("Second"), &[("only.md", "Only")]),
                index(
                    "index.md",
                    None,
                    &[("intro/index.md", "Intro"), ("second/index.md", "Second")]
                ),
            ]
        );
    }

    #[test]
    fn blank_lines_do_not_open_an_introduction() {
        let effects = run(Config::default(), "# Section\n\n   \n## Real\n");

        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, Effect::OpenFile(p) if p.ends_with("introduction.md")))
        );
    }

    #[test]
    fn blank_lines_are_kept_once_a_file_is_open() {
        let effects = run(Config::default(), "# S\n## A\n\nbody\n");

        assert!(effects.contains(&Effect::Write("\n")));
    }

    #[test]
    fn empty_section_has_no_index_but_is_listed_in_root() {
        let effects = run(Config::default(), "# Empty\n# Full\n## Page\n");

        assert!(!effects.iter().any(
            |e| matches!(e, Effect::RenderIndex { path, .. } if path.as_path() == std::path::Path::new("empty/index.md"))
        ));
        assert_eq!(
            effects.last(),
            Some(&index(
                "index.md",
                None,
                &[("empty/index.md", "Empty"), ("full/index.md", "Full")]
            ))
        );
    }

    #[test]
    fn preamble_is_written_to_root_but_not_indexed() {
        let effects = run(Config::default(), "Leading text\n## Early\n# Section\n## Page\n");

        assert_eq!(effects[0], Effect::OpenFile("introduction.md".into()));
        assert!(effects.contains(&Effect::OpenFile("early.md".into())));
        assert_eq!(
            effects.last(),
            Some(&index("index.md", None, &[("section/index.md", "Section")]))
        );
    }

    #[test]
    fn preamble_without_any_section_produces_no_index() {
        let effects = run(Config::default(), "just text\n## Heading\n");

        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, Effect::RenderIndex { .. }))
        );
    }

    #[test]
    fn preamble_is_indexed_when_configured() {
        let mut config = Config::default();
        config.index_preamble = true;

        let effects = run(config, "Leading text\n## Early\n# Section\n## Page\n");

        assert_eq!(
            effects.last(),
            Some(&index(
                "index.md",
                None,
                &[
                    ("introduction.md", "Introduction"),
                    ("early.md", "Early"),
                    ("section/index.md", "Section")
                ]
            ))
        );
    }

    #[test]
    fn preamble_alone_is_indexed_when_configured() {
        let mut config = Config::default();
        config.index_preamble = true;

        let effects = run(config, "## Only\n");

        assert_eq!(
            effects.last(),
            Some(&index("index.md", None, &[("only.md", "Only")]))
        );
    }

    #[test]
    fn level_three_headings_open_files() {
        let effects = run(Config::default(), "# S\n### Deep\n#### Deeper\n");

        assert!(effects.contains(&Effect::OpenFile("s/deep.md".into())));
        assert!(effects.contains(&Effect::Write("#### Deeper\n")));
    }

    #[test]
    fn every_open_closes_the_previous_file() {
        let effects = run(Config::default(), "# S\nintro\n## A\n## B\n# T\n## C\n");

        let mut open = false;
        for effect in &effects {
            match effect {
                Effect::OpenFile(_) => {
                    assert!(!open, "opened a file while another was open");
                    open = true;
                }
                Effect::CloseFile => {
                    assert!(open, "closed with nothing open");
                    open = false;
                }
                Effect::Write(_) => assert!(open, "wrote with nothing open"),
                _ => {}
            }
        }
        assert!(!open);
    }

    #[test]
    fn custom_file_names() {
        let config: Config = toml::from_str(
            "_version = \"1\"\nindex_file = \"README.md\"\nintroduction_file = \"overview.md\"\nintroduction_title = \"Overview\"\n",
        )
        .unwrap();

        let effects = run(config, "# S\ntext\n");

        assert!(effects.contains(&Effect::OpenFile("s/overview.md".into())));
        assert_eq!(
            effects.last(),
            Some(&index("README.md", None, &[("s/README.md", "S")]))
        );
        assert!(effects.contains(&index(
            "s/README.md",
            Some("S"),
            &[("overview.md", "Overview")]
        )));
    }
}
