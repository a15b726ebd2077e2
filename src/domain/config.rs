use std::path::Path;

use serde::Deserialize;

/// Configuration for splitting a document.
///
/// This struct controls the names used for generated files and how content
/// appearing before the first level-1 heading is indexed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// File name of generated indexes.
    index_file: String,

    /// File name for content preceding the first sub-heading of a section.
    introduction_file: String,

    /// Link text of the introduction entry.
    introduction_title: String,

    /// Whether entries found before the first level-1 heading are linked
    /// from the root index.
    ///
    /// When `false` (default) the preamble files are still written to the
    /// output root, but nothing links to them.
    pub index_preamble: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
            introduction_file: default_introduction_file(),
            introduction_title: default_introduction_title(),
            index_preamble: false,
        }
    }
}

impl Config {
    /// The name of the configuration file looked up next to the input.
    pub const FILE_NAME: &'static str = "mdsplit.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads `mdsplit.toml` from `dir`, falling back to the defaults.
    #[must_use]
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(Self::FILE_NAME);
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config from {}: {e}", path.display());
            Self::default()
        })
    }

    /// File name of generated indexes, `index.md` by default.
    #[must_use]
    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    /// File name of introductions, `introduction.md` by default.
    #[must_use]
    pub fn introduction_file(&self) -> &str {
        &self.introduction_file
    }

    /// Link text of introduction entries, `Introduction` by default.
    #[must_use]
    pub fn introduction_title(&self) -> &str {
        &self.introduction_title
    }
}

fn default_index_file() -> String {
    "index.md".to_string()
}

fn default_introduction_file() -> String {
    "introduction.md".to_string()
}

fn default_introduction_title() -> String {
    "Introduction".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_index_file")]
        index_file: String,

        #[serde(default = "default_introduction_file")]
        introduction_file: String,

        #[serde(default = "default_introduction_title")]
        introduction_title: String,

        #[serde(default)]
        index_preamble: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                index_file,
                introduction_file,
                introduction_title,
                index_preamble,
            } => Self {
                index_file,
                introduction_file,
                introduction_title,
                index_preamble,
            },
        }
    }
}
