//! Blank-line collapser — cross-line pass over normalized text.
//!
//! Stage 2 of the cleaning pipeline. Three strategies are available:
//!
//! - [`BlankLineMode::SingleBlank`] keeps at most one blank line between
//!   stanzas (default).
//! - [`BlankLineMode::DensityReduce`] targets uniformly double-spaced pastes:
//!   when multi-newline breaks outnumber single ones, one newline is removed
//!   from every break of two or more.
//! - [`BlankLineMode::RemoveAll`] drops every blank line.
//!
//! All modes return text without leading or trailing blank lines.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::split_lines;

/// A run of one or more newline characters.
static NEWLINE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("newline-run regex must compile"));

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// How runs of blank lines are reduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlankLineMode {
    /// Collapse each blank run to exactly one blank line.
    #[default]
    SingleBlank,
    /// Remove one newline from every multi-newline break, but only when the
    /// text is predominantly double-spaced.
    DensityReduce,
    /// Remove all blank lines.
    RemoveAll,
}

impl BlankLineMode {
    /// Parse a mode name, accepting kebab-case, snake_case and run-together
    /// spellings.
    pub fn parse(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "single-blank" | "single_blank" | "singleblank" | "single" => Some(Self::SingleBlank),
            "density-reduce" | "density_reduce" | "densityreduce" | "density" => {
                Some(Self::DensityReduce)
            }
            "remove-all" | "remove_all" | "removeall" | "none" => Some(Self::RemoveAll),
            _ => None,
        }
    }
}

impl fmt::Display for BlankLineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleBlank => write!(f, "single-blank"),
            Self::DensityReduce => write!(f, "density-reduce"),
            Self::RemoveAll => write!(f, "remove-all"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reduce blank-line runs in `text` using `mode`.
pub fn collapse_blank_runs(text: &str, mode: BlankLineMode) -> String {
    match mode {
        BlankLineMode::SingleBlank => collapse_to_single_blank(text),
        BlankLineMode::DensityReduce => reduce_density(text),
        BlankLineMode::RemoveAll => remove_blank_lines(text),
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn collapse_to_single_blank(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    // Starting as "blank" drops leading blank lines.
    let mut previous_blank = true;

    for line in split_lines(text) {
        if line.trim().is_empty() {
            if !previous_blank {
                kept.push("");
            }
            previous_blank = true;
        } else {
            kept.push(line);
            previous_blank = false;
        }
    }

    while kept.last().is_some_and(|line| line.is_empty()) {
        kept.pop();
    }

    kept.join("\n")
}

fn reduce_density(text: &str) -> String {
    let normalized = split_lines(text)
        .into_iter()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n");

    let (mut multi, mut single) = (0usize, 0usize);
    for run in NEWLINE_RUN_RE.find_iter(&normalized) {
        if run.len() >= 2 {
            multi += 1;
        } else {
            single += 1;
        }
    }

    let reduced = if multi > single {
        NEWLINE_RUN_RE
            .replace_all(&normalized, |caps: &Captures<'_>| {
                let run = &caps[0];
                if run.len() >= 2 {
                    run[1..].to_string()
                } else {
                    run.to_string()
                }
            })
            .into_owned()
    } else {
        normalized
    };

    reduced.trim_matches('\n').to_string()
}

fn remove_blank_lines(text: &str) -> String {
    split_lines(text)
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
