//! A single run: markdown file in, directory tree out.
//!
//! The [`Splitter`] wires the line classifier, the [`Cursor`] and an
//! [`Emitter`] over the [`Disk`] together, then hands the finished tree to
//! the [`Sanitizer`].

use std::{
    borrow::Cow,
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    domain::{Config, Cursor, Line},
    storage::{
        Disk, FileSystem,
        emit::{EmitError, Emitter, Stats},
        sanitize::{Outcome, Sanitizer},
    },
};

/// Splits one markdown file into a directory tree.
#[derive(Debug, Clone)]
pub struct Splitter {
    input: PathBuf,
    output: PathBuf,
    config: Config,
}

impl Splitter {
    /// Prepares a split of `input` into `output`, with default configuration.
    #[must_use]
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            config: Config::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The input file.
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// The output directory.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Runs the split.
    ///
    /// The output directory is deleted and recreated before parsing. An I/O
    /// failure while parsing does not abort the run: it is logged, the open
    /// file is closed, indexes are still rendered and the tree is still
    /// sanitized. The failure is then reported in
    /// [`Report::interrupted`].
    ///
    /// # Errors
    ///
    /// This method fails, without touching the output, if the input does not
    /// exist or is not a file. It also fails if the output directory cannot
    /// be replaced.
    #[instrument(skip(self), fields(input = %self.input.display(), output = %self.output.display()))]
    pub fn run(&self) -> Result<Report, SplitError> {
        if !self.input.exists() {
            return Err(SplitError::InputNotFound(self.input.clone()));
        }
        if !self.input.is_file() {
            return Err(SplitError::InputNotAFile(self.input.clone()));
        }

        self.replace_output()?;

        let mut emitter = Emitter::new(Disk::new(self.output.clone()));
        let mut cursor = Cursor::new(self.config.clone());

        let mut interrupted = self.parse(&mut cursor, &mut emitter).err();
        if let Some(e) = &interrupted {
            log_interruption(e);
        }

        // Best effort from here on: the first failure is kept.
        let finished = emitter
            .close()
            .map_err(ParseError::from)
            .and_then(|()| emitter.apply_all(cursor.finish()).map_err(ParseError::from));
        if let Err(e) = finished {
            log_interruption(&e);
            interrupted.get_or_insert(e);
        }
        let stats = emitter.stats();

        tracing::info!("Cleaning up empty artifacts");
        let cleanup = Sanitizer::new(&self.output).run();

        Ok(Report {
            stats,
            cleanup,
            interrupted,
        })
    }

    fn replace_output(&self) -> Result<(), SplitError> {
        let prepare = |source| SplitError::PrepareOutput {
            path: self.output.clone(),
            source,
        };

        if self.output.exists() {
            fs::remove_dir_all(&self.output).map_err(prepare)?;
            tracing::info!(
                "Removed existing output directory: {}",
                self.output.display()
            );
        }
        fs::create_dir_all(&self.output).map_err(prepare)
    }

    fn parse<F: FileSystem>(
        &self,
        cursor: &mut Cursor,
        emitter: &mut Emitter<F>,
    ) -> Result<(), ParseError> {
        let read_error = |source| ParseError::Read {
            path: self.input.clone(),
            source,
        };

        let file = File::open(&self.input).map_err(read_error)?;
        let mut reader = BufReader::new(file);
        let mut buf = String::new();

        loop {
            buf.clear();
            if reader.read_line(&mut buf).map_err(read_error)? == 0 {
                return Ok(());
            }
            for line in normalize_line_endings(&buf).split_inclusive('\n') {
                emitter.apply_all(cursor.advance(Line::classify(line)))?;
            }
        }
    }
}

/// Rewrites `\r\n` and lone `\r` terminators as `\n`.
///
/// `read_line` only stops at `\n`, so a lone `\r` can sit mid-buffer; the
/// caller splits the result back into lines.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn log_interruption(error: &ParseError) {
    let mut chain = vec![error.to_string()];
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    tracing::error!("An error occurred while splitting: {}", chain.join(": "));
    tracing::debug!("{error:#?}");
}

/// The result of a completed run.
#[derive(Debug)]
pub struct Report {
    /// What was written.
    pub stats: Stats,
    /// Every action taken by the cleanup pass.
    pub cleanup: Vec<Outcome>,
    /// The failure that cut parsing short, if any.
    pub interrupted: Option<ParseError>,
}

impl Report {
    /// Number of artifacts removed by the cleanup pass.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.cleanup.iter().filter(|o| o.is_removed()).count()
    }

    /// Whether every line was processed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

/// A failure that prevents a split from running.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The input path does not exist.
    #[error("Input file '{}' not found.", .0.display())]
    InputNotFound(PathBuf),

    /// The input path exists but is not a regular file.
    #[error("Input path '{}' is not a file.", .0.display())]
    InputNotAFile(PathBuf),

    /// The output directory could not be removed or recreated.
    #[error("failed to prepare output directory {}", path.display())]
    PrepareOutput {
        /// The output directory.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

/// A failure that cut a running split short.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input could not be read (including invalid UTF-8).
    #[error("failed to read {}", path.display())]
    Read {
        /// The input file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Output could not be written.
    #[error(transparent)]
    Emit(#[from] EmitError),
}
