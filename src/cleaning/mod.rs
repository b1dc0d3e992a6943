//! Lyric cleaning pipeline.
//!
//! Turns raw pasted lyric text into display-ready text. The pipeline is
//! deterministic, allocation-light and infallible: every input, including the
//! empty string, produces a result.
//!
//! # Pipeline Stages
//!
//! 1. **Line normalization** — per-line trim, whitespace collapse, removal of
//!    spaces before punctuation, trailing punctuation stripping and dash
//!    cleanup. The line count is preserved; blank lines become empty strings.
//! 2. **Blank-line collapsing** — cross-line pass that reduces blank-line runs
//!    according to the selected [`BlankLineMode`] and drops blank lines at the
//!    edges of the text.
//!
//! Word and line statistics for the raw and cleaned text are gathered by the
//! [`metrics`] helpers.

pub mod blank;
pub mod line;
pub mod metrics;

pub use blank::{BlankLineMode, collapse_blank_runs};
pub use line::normalize_lines;
pub use metrics::{DigitStyle, TextStats, count_lines, count_words, to_localized_digits};

use crate::config::schema::CleaningConfig;

// ---------------------------------------------------------------------------
// Line splitting
// ---------------------------------------------------------------------------

/// Split text into lines, treating `\r\n`, `\r` and `\n` as equivalent
/// separators.
///
/// Unlike [`str::lines`], a trailing separator yields a final empty line, so
/// `"A\n"` splits into `["A", ""]`. This keeps the line count of every stage
/// comparable to its input.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }

    lines.push(&text[start..]);
    lines
}

/// Number of physical lines in `text`; the empty string has none.
fn physical_line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        split_lines(text).len()
    }
}

// ---------------------------------------------------------------------------
// Pipeline options and output
// ---------------------------------------------------------------------------

/// Knobs for a single cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    /// How runs of blank lines are reduced.
    pub blank_lines: BlankLineMode,
    /// Rewrite internal `--` runs as an em-dash.
    pub em_dash: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            blank_lines: BlankLineMode::default(),
            em_dash: true,
        }
    }
}

impl From<&CleaningConfig> for CleanOptions {
    fn from(config: &CleaningConfig) -> Self {
        Self {
            blank_lines: config.blank_lines,
            em_dash: config.em_dash,
        }
    }
}

/// Result of the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    /// The cleaned, display-ready text.
    pub text: String,
    /// Blank-line mode the text was formatted with.
    pub mode: BlankLineMode,
    /// Statistics of the raw input.
    pub before: TextStats,
    /// Statistics of the cleaned output.
    pub after: TextStats,
    /// Physical lines dropped between input and output.
    pub blank_lines_removed: usize,
}

// ---------------------------------------------------------------------------
// Pipeline orchestrator
// ---------------------------------------------------------------------------

/// Run the full cleaning pipeline on raw lyric text.
pub fn clean_lyrics(raw: &str, options: &CleanOptions) -> CleanReport {
    let normalized = line::normalize_lines_with(raw, options.em_dash);
    let text = blank::collapse_blank_runs(&normalized, options.blank_lines);

    let blank_lines_removed = physical_line_count(raw).saturating_sub(physical_line_count(&text));

    CleanReport {
        before: TextStats::from_text(raw),
        after: TextStats::from_text(&text),
        mode: options.blank_lines,
        blank_lines_removed,
        text,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
