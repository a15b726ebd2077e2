//! Where split output is written.
//!
//! The [`FileSystem`] trait is the seam between the effect emitter and real
//! storage. [`Disk`] writes under an output root; tests use an in-memory
//! implementation.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

/// A destination for directories and files, addressed by relative paths.
pub trait FileSystem {
    /// Writer handed out for newly created files.
    type File: Write;

    /// Creates a directory. An existing directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, or if the path
    /// exists and is not a directory.
    fn create_dir(&mut self, path: &Path) -> io::Result<()>;

    /// Creates a file, truncating any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    fn create_file(&mut self, path: &Path) -> io::Result<Self::File>;
}

/// A [`FileSystem`] rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct Disk {
    root: PathBuf,
}

impl Disk {
    /// Writes below `root`. The root itself must already exist.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl FileSystem for Disk {
    type File = BufWriter<File>;

    fn create_dir(&mut self, path: &Path) -> io::Result<()> {
        let path = self.root.join(path);
        match fs::create_dir(&path) {
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            result => result,
        }
    }

    fn create_file(&mut self, path: &Path) -> io::Result<Self::File> {
        File::create(self.root.join(path)).map(BufWriter::new)
    }
}
