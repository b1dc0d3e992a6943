//! Line normalizer — per-line whitespace and punctuation cleanup.
//!
//! Stage 1 of the cleaning pipeline. Each input line maps to exactly one
//! output line:
//!
//! - Blank lines become empty strings (collapsing is the next stage's job).
//! - Content lines are trimmed and internal whitespace runs collapse to a
//!   single space.
//! - Whitespace in front of a sentence mark (`. , ; : ! ? । ॥`) is removed.
//! - A trailing run of punctuation and symbols is stripped, which also takes
//!   care of the `--` flourish pasted lyrics often end a line with.
//! - Remaining `--` runs inside a line become an em-dash.

use std::sync::LazyLock;

use regex::Regex;

use super::split_lines;

// ---------------------------------------------------------------------------
// Compiled regexes (compiled once, reused)
// ---------------------------------------------------------------------------

/// Whitespace immediately before a sentence mark.
static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+([.,;:!?।॥])").expect("space-before-punctuation regex must compile")
});

/// Two or more hyphens in a row.
static HYPHEN_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("hyphen-run regex must compile"));

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// Characters stripped from the end of a content line. `!` and `?` are
/// deliberately absent: they carry meaning in a lyric line.
const TRAILING_JUNK: &[char] = &[
    '.', ',', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}', '<', '>', '-', '_', '=', '+',
    '@', '#', '$', '%', '^', '&', '*', '|', '/', '\\', '~', '`', '।', '॥',
];

/// Replacement for internal `--` runs.
pub const EM_DASH: &str = "\u{2014}";

fn is_trailing_junk(c: char) -> bool {
    c.is_whitespace() || TRAILING_JUNK.contains(&c)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Normalize every line of `raw`, rewriting internal `--` as an em-dash.
///
/// Empty or whitespace-only input yields an empty string. Otherwise the
/// output has exactly as many lines as the input, joined with `\n`.
pub fn normalize_lines(raw: &str) -> String {
    normalize_lines_with(raw, true)
}

/// [`normalize_lines`] with em-dash rewriting switchable.
pub fn normalize_lines_with(raw: &str, em_dash: bool) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    split_lines(raw)
        .into_iter()
        .map(|line| normalize_line(line, em_dash))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a single line. Blank lines come back empty.
pub fn normalize_line(line: &str, em_dash: bool) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let tightened = SPACE_BEFORE_PUNCT_RE.replace_all(&collapsed, "$1");

    // Whitespace is part of the stripped class so a cluster like `word ( .`
    // never leaves a dangling space behind.
    let stripped = tightened.trim_end_matches(is_trailing_junk);

    if em_dash && stripped.contains("--") {
        HYPHEN_RUN_RE.replace_all(stripped, EM_DASH).into_owned()
    } else {
        stripped.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
