/// Applying cursor effects to the filesystem.
pub mod emit;
pub mod filesystem;
/// Index file rendering.
pub mod index;
pub mod sanitize;
/// A single split run.
pub mod split;

pub use emit::{EmitError, Emitter, Stats};
pub use filesystem::{Disk, FileSystem};
pub use sanitize::{Artifact, Outcome, Sanitizer, SkipReason};
pub use split::{ParseError, Report, SplitError, Splitter};
