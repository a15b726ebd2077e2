//! Styling for the summary printed after a split.

use owo_colors::{OwoColorize, colors::css};

/// How a summary line should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// The split ran to the end of the input.
    Complete,
    /// The split stopped early and the output is partial.
    Partial,
    /// Secondary detail, such as cleanup counts.
    Detail,
}

/// Applies a [`Tone`] to text, or leaves it plain when stdout cannot show colour.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    /// Checks stdout for colour support once, for the whole summary.
    pub fn detect() -> Self {
        Self {
            color: supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }

    pub fn paint(self, tone: Tone, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Complete => text.fg::<css::Green>().to_string(),
            Tone::Partial => text.fg::<css::Orange>().to_string(),
            Tone::Detail => text.dimmed().to_string(),
        }
    }
}
