//! Post-split cleanup of empty artifacts.
//!
//! Sections without content leave zero-byte files and empty directories
//! behind. The [`Sanitizer`] removes them bottom-up, reporting every action
//! it took (or declined to take) as an [`Outcome`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// What kind of artifact an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

/// Why an artifact was left in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The directory still has entries.
    NotEmpty,
    /// Removal failed for another reason.
    Io(io::ErrorKind),
}

impl From<&io::Error> for SkipReason {
    fn from(error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::DirectoryNotEmpty => Self::NotEmpty,
            kind => Self::Io(kind),
        }
    }
}

/// The result of one cleanup decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The artifact was deleted.
    Removed {
        /// Path of the deleted artifact.
        path: PathBuf,
        /// File or directory.
        kind: Artifact,
    },
    /// Removal was attempted and failed; the artifact remains.
    Skipped {
        /// Path of the retained artifact.
        path: PathBuf,
        /// File or directory.
        kind: Artifact,
        /// Why removal failed.
        reason: SkipReason,
    },
}

impl Outcome {
    /// Whether the artifact was deleted.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }

    /// Path the outcome refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Removed { path, .. } | Self::Skipped { path, .. } => path,
        }
    }
}

/// Removes zero-byte files and empty directories below a root.
///
/// The root itself is never removed. Nothing is escalated: every failure is
/// returned as [`Outcome::Skipped`].
#[derive(Debug)]
pub struct Sanitizer<'a> {
    root: &'a Path,
}

impl<'a> Sanitizer<'a> {
    /// Creates a sanitizer for the tree under `root`.
    #[must_use]
    pub const fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Walks the tree bottom-up, deleting empty artifacts.
    ///
    /// Non-empty files are left alone and produce no outcome. Every
    /// directory below the root yields exactly one outcome.
    #[must_use]
    pub fn run(&self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();

        for entry in WalkDir::new(self.root).min_depth(1).contents_first(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry during cleanup: {e}");
                    continue;
                }
            };
            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_file() {
                let empty = entry.metadata().is_ok_and(|metadata| metadata.len() == 0);
                if empty {
                    outcomes.push(remove(path, Artifact::File, fs::remove_file(path)));
                }
            } else if file_type.is_dir() {
                outcomes.push(remove(path, Artifact::Directory, fs::remove_dir(path)));
            }
        }

        outcomes
    }
}

fn remove(path: &Path, kind: Artifact, result: io::Result<()>) -> Outcome {
    let path = path.to_path_buf();
    match result {
        Ok(()) => {
            tracing::info!("Removed empty {}: {}", kind.noun(), path.display());
            Outcome::Removed { path, kind }
        }
        Err(e) => {
            tracing::debug!("Keeping {} {}: {e}", kind.noun(), path.display());
            Outcome::Skipped {
                path,
                kind,
                reason: SkipReason::from(&e),
            }
        }
    }
}

impl Artifact {
    const fn noun(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn removes_empty_files_and_directories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("empty/nested")).unwrap();
        fs::create_dir(root.join("kept")).unwrap();
        fs::write(root.join("kept/page.md"), "content\n").unwrap();
        fs::write(root.join("kept/blank.md"), "").unwrap();

        let outcomes = Sanitizer::new(root).run();

        assert!(!root.join("empty").exists());
        assert!(!root.join("kept/blank.md").exists());
        assert!(root.join("kept/page.md").exists());
        assert!(root.exists());

        let removed: Vec<_> = outcomes
            .iter()
            .filter(|o| o.is_removed())
            .map(|o| o.path().strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            removed.len(),
            3,
            "expected blank.md, empty/nested and empty: {removed:?}"
        );
    }

    #[test]
    fn directory_emptied_by_cleanup_is_removed() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("section")).unwrap();
        fs::write(root.join("section/introduction.md"), "").unwrap();

        let outcomes = Sanitizer::new(root).run();

        assert!(!root.join("section").exists());
        assert_eq!(
            outcomes,
            vec![
                Outcome::Removed {
                    path: root.join("section/introduction.md"),
                    kind: Artifact::File,
                },
                Outcome::Removed {
                    path: root.join("section"),
                    kind: Artifact::Directory,
                },
            ]
        );
    }

    #[test]
    fn non_empty_directory_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("section")).unwrap();
        fs::write(root.join("section/index.md"), "- [A](a.md)\n").unwrap();

        let outcomes = Sanitizer::new(root).run();

        assert_eq!(
            outcomes,
            vec![Outcome::Skipped {
                path: root.join("section"),
                kind: Artifact::Directory,
                reason: SkipReason::NotEmpty,
            }]
        );
    }

    #[test]
    fn root_is_never_removed() {
        let tmp = TempDir::new().unwrap();

        let outcomes = Sanitizer::new(tmp.path()).run();

        assert!(outcomes.is_empty());
        assert!(tmp.path().exists());
    }
}
