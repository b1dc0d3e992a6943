//! Analytics reporter — aggregation over the cleaning log.
//!
//! Reads the JSONL clean log and provides:
//! - **Summary**: totals, blank lines removed, mode and source distribution
//! - **Daily**: per-day run counts for `gaan history`

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::analytics::logger::{self, CleanLogEntry};

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Totals across a set of cleaning runs.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct HistorySummary {
    pub runs: usize,
    pub input_words: usize,
    pub output_words: usize,
    pub input_lines: usize,
    pub output_lines: usize,
    pub blank_lines_removed: usize,
    /// Runs per blank-line mode.
    pub by_mode: BTreeMap<String, usize>,
    /// Runs per source (`cli` / `web`).
    pub by_source: BTreeMap<String, usize>,
}

impl HistorySummary {
    /// Words removed by cleaning (stray punctuation tokens).
    pub fn words_dropped(&self) -> usize {
        self.input_words.saturating_sub(self.output_words)
    }
}

/// A single day in the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    pub date: String,
    pub runs: usize,
    pub blank_lines_removed: usize,
    pub avg_duration_us: f64,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Summarize the log at `path`, optionally limited to the last `days` days.
pub fn compute_summary(path: &Path, days: Option<u32>) -> HistorySummary {
    summarize(&logger::read_entries_since_days(path, days))
}

/// Per-day breakdown of the last `days` days, oldest first.
pub fn compute_daily(path: &Path, days: u32) -> Vec<DailyEntry> {
    daily(&logger::read_entries_since_days(path, Some(days)))
}

pub fn summarize(entries: &[CleanLogEntry]) -> HistorySummary {
    let mut summary = HistorySummary::default();

    for entry in entries {
        summary.runs += 1;
        summary.input_words += entry.input_words;
        summary.output_words += entry.output_words;
        summary.input_lines += entry.input_lines;
        summary.output_lines += entry.output_lines;
        summary.blank_lines_removed += entry.blank_lines_removed;
        *summary.by_mode.entry(entry.mode.clone()).or_default() += 1;
        *summary.by_source.entry(entry.source.clone()).or_default() += 1;
    }

    summary
}

pub fn daily(entries: &[CleanLogEntry]) -> Vec<DailyEntry> {
    let mut days: BTreeMap<&str, (usize, usize, u64)> = BTreeMap::new();

    for entry in entries {
        let slot = days.entry(entry.day()).or_default();
        slot.0 += 1;
        slot.1 += entry.blank_lines_removed;
        slot.2 = slot.2.saturating_add(entry.duration_us);
    }

    days.into_iter()
        .map(|(date, (runs, blank_lines_removed, total_us))| DailyEntry {
            date: date.to_string(),
            runs,
            blank_lines_removed,
            avg_duration_us: total_us as f64 / runs as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(timestamp: &str, source: &str, mode: &str, removed: usize, duration_us: u64) -> CleanLogEntry {
        CleanLogEntry {
            timestamp: timestamp.to_string(),
            source: source.to_string(),
            mode: mode.to_string(),
            input_words: 10,
            input_lines: 4,
            output_words: 9,
            output_lines: 4,
            input_bytes: 100,
            output_bytes: 80,
            blank_lines_removed: removed,
            duration_us,
        }
    }

    #[test]
    fn summarize_empty_is_default() {
        assert_eq!(summarize(&[]), HistorySummary::default());
    }

    #[test]
    fn summarize_totals_and_distribution() {
        let entries = vec![
            entry("2026-10-01T10:00:00+00:00", "cli", "single-blank", 3, 100),
            entry("2026-10-01T11:00:00+00:00", "web", "single-blank", 1, 50),
            entry("2026-10-02T09:00:00+00:00", "web", "density-reduce", 2, 30),
        ];
        let summary = summarize(&entries);

        assert_eq!(summary.runs, 3);
        assert_eq!(summary.input_words, 30);
        assert_eq!(summary.words_dropped(), 3);
        assert_eq!(summary.blank_lines_removed, 6);
        assert_eq!(summary.by_mode["single-blank"], 2);
        assert_eq!(summary.by_mode["density-reduce"], 1);
        assert_eq!(summary.by_source["web"], 2);
        assert_eq!(summary.by_source["cli"], 1);
    }

    #[test]
    fn daily_groups_by_date() {
        let entries = vec![
            entry("2026-10-02T09:00:00+00:00", "web", "single-blank", 2, 30),
            entry("2026-10-01T10:00:00+00:00", "cli", "single-blank", 3, 100),
            entry("2026-10-01T11:00:00+00:00", "web", "single-blank", 1, 50),
        ];
        let days = daily(&entries);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2026-10-01");
        assert_eq!(days[0].runs, 2);
        assert_eq!(days[0].blank_lines_removed, 4);
        assert!((days[0].avg_duration_us - 75.0).abs() < f64::EPSILON);
        assert_eq!(days[1].date, "2026-10-02");
    }
}
