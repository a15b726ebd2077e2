//! Prefix-based classification of input lines.

/// A single input line, classified by its heading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A line starting with `"# "`. Opens a new section directory.
    Heading1 {
        /// The heading text, trimmed.
        title: &'a str,
    },

    /// A line starting with `"## "` or `"### "`. Opens a new file.
    HeadingSub {
        /// The heading text, trimmed.
        title: &'a str,
        /// The whole line, marker and terminator included.
        raw: &'a str,
    },

    /// Anything else, blank lines included.
    Content(&'a str),
}

impl<'a> Line<'a> {
    /// Classifies a line.
    ///
    /// The line is expected to carry its terminator (if any); it is kept
    /// verbatim in the `raw` field of [`Line::HeadingSub`] and in [`Line::Content`].
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix("# ") {
            return Self::Heading1 { title: rest.trim() };
        }

        if let Some(rest) = line
            .strip_prefix("## ")
            .or_else(|| line.strip_prefix("### "))
        {
            return Self::HeadingSub {
                title: rest.trim(),
                raw: line,
            };
        }

        Self::Content(line)
    }

    /// Whether this is a content line containing only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Content(text) if text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("# Title\n", "Title"; "simple")]
    #[test_case("#   Spaced out  \n", "Spaced out"; "trimmed")]
    #[test_case("# \n", ""; "empty title")]
    #[test_case("# No newline", "No newline"; "last line")]
    fn heading1(line: &str, title: &str) {
        assert_eq!(Line::classify(line), Line::Heading1 { title });
    }

    #[test_case("## Second\n", "Second"; "level two")]
    #[test_case("### Third\n", "Third"; "level three")]
    #[test_case("##    Padded \n", "Padded"; "trimmed")]
    fn heading_sub(line: &str, title: &str) {
        assert_eq!(Line::classify(line), Line::HeadingSub { title, raw: line });
    }

    #[test_case("plain text\n"; "text")]
    #[test_case("\n"; "blank")]
    #[test_case("#NoSpace\n"; "marker without space")]
    #[test_case("#### Fourth\n"; "level four")]
    #[test_case(" # Indented\n"; "indented marker")]
    #[test_case("#\n"; "bare hash")]
    fn content(line: &str) {
        assert_eq!(Line::classify(line), Line::Content(line));
    }

    #[test]
    fn blank_detection() {
        assert!(Line::classify("   \t\n").is_blank());
        assert!(!Line::classify("text\n").is_blank());
        assert!(!Line::classify("## Heading\n").is_blank());
    }
}
