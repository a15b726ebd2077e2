//! Applying cursor effects to a [`FileSystem`].

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{
    domain::Effect,
    storage::{FileSystem, index},
};

/// Counts of what an [`Emitter`] has produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Directories created (or found existing).
    pub directories: usize,
    /// Content files opened.
    pub files: usize,
    /// Index files written.
    pub indexes: usize,
}

/// Applies [`Effect`]s in order, holding at most one open file.
pub struct Emitter<F: FileSystem> {
    fs: F,
    open: Option<(PathBuf, F::File)>,
    stats: Stats,
}

impl<F: FileSystem> Emitter<F> {
    /// Creates an emitter writing to `fs`.
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            open: None,
            stats: Stats::default(),
        }
    }

    /// What has been produced so far.
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    /// Applies a single effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying filesystem operation fails, or if
    /// a write is requested while no file is open.
    pub fn apply(&mut self, effect: Effect<'_>) -> Result<(), EmitError> {
        match effect {
            Effect::CreateDir(path) => {
                self.fs
                    .create_dir(&path)
                    .map_err(|source| EmitError::CreateDir {
                        path: path.clone(),
                        source,
                    })?;
                tracing::info!("Created directory: {}", path.display());
                self.stats.directories += 1;
            }
            Effect::OpenFile(path) => {
                self.close()?;
                let file = self
                    .fs
                    .create_file(&path)
                    .map_err(|source| EmitError::CreateFile {
                        path: path.clone(),
                        source,
                    })?;
                tracing::info!("Created file: {}", path.display());
                self.stats.files += 1;
                self.open = Some((path, file));
            }
            Effect::Write(text) => {
                let (path, file) = self.open.as_mut().ok_or(EmitError::NoOpenFile)?;
                file.write_all(text.as_bytes())
                    .map_err(|source| EmitError::Write {
                        path: path.clone(),
                        source,
                    })?;
            }
            Effect::CloseFile => self.close()?,
            Effect::RenderIndex {
                path,
                title,
                entries,
            } => {
                let Some(contents) = index::render(&entries) else {
                    return Ok(());
                };
                tracing::info!(
                    "Generating index for {}: {}",
                    title.as_deref().unwrap_or("root"),
                    path.display()
                );
                self.write_index(&path, &contents)
                    .map_err(|source| EmitError::Index { path, source })?;
                self.stats.indexes += 1;
            }
        }
        Ok(())
    }

    /// Applies effects in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn apply_all<'a>(
        &mut self,
        effects: impl IntoIterator<Item = Effect<'a>>,
    ) -> Result<(), EmitError> {
        effects.into_iter().try_for_each(|effect| self.apply(effect))
    }

    /// Flushes and releases the open file, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if buffered content cannot be flushed.
    pub fn close(&mut self) -> Result<(), EmitError> {
        if let Some((path, mut file)) = self.open.take() {
            file.flush()
                .map_err(|source| EmitError::Write { path, source })?;
        }
        Ok(())
    }

    fn write_index(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        let mut file = self.fs.create_file(path)?;
        file.write_all(contents.as_bytes())?;
        file.flush()
    }

    #[cfg(test)]
    fn into_inner(mut self) -> F {
        self.open = None;
        self.fs
    }
}

/// A filesystem effect that could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A directory could not be created.
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        /// The directory.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// A file could not be created.
    #[error("failed to create file {}", path.display())]
    CreateFile {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Writing to (or flushing) an open file failed.
    #[error("failed to write to {}", path.display())]
    Write {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// An index file could not be written.
    #[error("failed to write index {}", path.display())]
    Index {
        /// The index file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// A write was requested with no file open.
    #[error("no file is open for writing")]
    NoOpenFile,
}
