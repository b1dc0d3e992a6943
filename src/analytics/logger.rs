use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cleaning::CleanReport;
use crate::config::schema::LoggingConfig;
use crate::utils::paths;

// ---------------------------------------------------------------------------
// Clean log entry (JSONL analytics)
// ---------------------------------------------------------------------------

/// Where a cleaning run was triggered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSource {
    Cli,
    Web,
}

impl RunSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Web => "web",
        }
    }
}

/// A single entry in the cleaning log (`~/.gaan/clean-log.jsonl`).
///
/// Only counts are recorded, never the lyric text itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanLogEntry {
    pub timestamp: String,
    /// `"cli"` or `"web"`.
    pub source: String,
    /// Blank-line mode the run used.
    pub mode: String,
    pub input_words: usize,
    pub input_lines: usize,
    pub output_words: usize,
    pub output_lines: usize,
    pub input_bytes: usize,
    pub output_bytes: usize,
    #[serde(default)]
    pub blank_lines_removed: usize,
    /// Wall-clock time of the pipeline (microseconds).
    #[serde(default)]
    pub duration_us: u64,
}

impl CleanLogEntry {
    pub fn from_report(
        source: RunSource,
        report: &CleanReport,
        input_bytes: usize,
        duration: Duration,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            source: source.as_str().to_string(),
            mode: report.mode.to_string(),
            input_words: report.before.words,
            input_lines: report.before.lines,
            output_words: report.after.words,
            output_lines: report.after.lines,
            input_bytes,
            output_bytes: report.text.len(),
            blank_lines_removed: report.blank_lines_removed,
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        }
    }

    /// Calendar day (`YYYY-MM-DD`) of the entry.
    pub fn day(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Record a cleaning run if logging is enabled. Failures are swallowed: the
/// log must never get in the way of cleaning.
pub fn log_clean_run(
    config: &LoggingConfig,
    source: RunSource,
    report: &CleanReport,
    input_bytes: usize,
    duration: Duration,
) {
    if !config.enabled {
        return;
    }

    let entry = CleanLogEntry::from_report(source, report, input_bytes, duration);
    let _ = append_log_entry(&log_path(config), &entry);
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all entries from the log at `path`.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries(path: &Path) -> Vec<CleanLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<CleanLogEntry>(&line).ok())
        .collect()
}

/// Read log entries filtered to a time window (last N days).
///
/// If `days` is `None`, returns all entries.
pub fn read_entries_since_days(path: &Path, days: Option<u32>) -> Vec<CleanLogEntry> {
    let entries = read_all_entries(path);

    let Some(days) = days else {
        return entries;
    };

    let cutoff = (Utc::now() - chrono::Duration::days(i64::from(days))).to_rfc3339();

    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff)
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

pub fn append_log_entry(path: &Path, entry: &CleanLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Resolved path of the clean log.
pub fn log_path(config: &LoggingConfig) -> PathBuf {
    paths::expand_home(&config.path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::{CleanOptions, clean_lyrics};

    fn temp_log(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gaan-logger-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("clean-log.jsonl")
    }

    #[test]
    fn entry_captures_report_counts() {
        let raw = "এক দুই।\n\n\nতিন--";
        let report = clean_lyrics(raw, &CleanOptions::default());
        let entry =
            CleanLogEntry::from_report(RunSource::Web, &report, raw.len(), Duration::from_micros(42));

        assert_eq!(entry.source, "web");
        assert_eq!(entry.mode, "single-blank");
        assert_eq!(entry.input_words, 3);
        assert_eq!(entry.output_lines, 2);
        assert_eq!(entry.blank_lines_removed, 1);
        assert_eq!(entry.duration_us, 42);
        assert_eq!(entry.day().len(), 10);
    }

    #[test]
    fn append_then_read_back() {
        let path = temp_log("roundtrip");
        let report = clean_lyrics("এক\nদুই", &CleanOptions::default());
        let entry = CleanLogEntry::from_report(RunSource::Cli, &report, 20, Duration::ZERO);

        append_log_entry(&path, &entry).unwrap();
        append_log_entry(&path, &entry).unwrap();
        fs::write(
            &path,
            format!("{}not json\n", fs::read_to_string(&path).unwrap()),
        )
        .unwrap();

        let entries = read_all_entries(&path);
        assert_eq!(entries, vec![entry.clone(), entry]);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_log_reads_empty() {
        assert!(read_all_entries(&temp_log("missing")).is_empty());
    }

    #[test]
    fn disabled_logging_writes_nothing() {
        let path = temp_log("disabled");
        let config = LoggingConfig {
            enabled: false,
            path: path.to_string_lossy().into_owned(),
        };
        let report = clean_lyrics("এক", &CleanOptions::default());
        log_clean_run(&config, RunSource::Cli, &report, 9, Duration::ZERO);
        assert!(!path.exists());
    }
}
