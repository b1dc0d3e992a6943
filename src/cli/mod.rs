//! CLI command implementations for gaan.
//!
//! Provides subcommand handlers for:
//! - `gaan clean [FILE]` — clean lyrics from a file or stdin
//! - `gaan count [FILE]` — word and line counts
//! - `gaan serve` — run the web app
//! - `gaan artist list|show|add|remove|song-add|song-remove` — catalog management
//! - `gaan history` — cleaning history from the analytics log
//! - `gaan config show|init|set|reset` — configuration management

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::logger::{self, RunSource};
use crate::analytics::reporter::{self, DailyEntry, HistorySummary};
use crate::catalog::{Artist, ArtistInput, Catalog, SongInput};
use crate::cleaning::{self, BlankLineMode, CleanOptions, CleanReport, DigitStyle, TextStats};
use crate::config::{self, GaanConfig};
use crate::utils::paths;
use crate::web;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

/// Read lyric text from `file`, or from stdin when no file (or `-`) is given.
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => io::read_to_string(io::stdin()).context("failed to read lyrics from stdin"),
    }
}

fn open_catalog(config: &GaanConfig) -> Result<Catalog> {
    let path = paths::expand_home(&config.catalog.path);
    Catalog::open(&path).with_context(|| format!("failed to open catalog at {}", path.display()))
}

/// Clean `raw` with the configured options, `mode` overriding the blank-line
/// strategy when given.
fn clean_with(raw: &str, mode: Option<&str>, config: &GaanConfig) -> Result<CleanReport> {
    let mut options = CleanOptions::from(&config.cleaning);
    if let Some(mode) = mode {
        options.blank_lines = BlankLineMode::parse(mode).with_context(|| {
            format!("unknown mode '{mode}' (expected single-blank, density-reduce or remove-all)")
        })?;
    }
    Ok(cleaning::clean_lyrics(raw, &options))
}

// ---------------------------------------------------------------------------
// gaan clean
// ---------------------------------------------------------------------------

/// Clean lyrics and print them (or write them to `output`).
///
/// Statistics go to stderr so the cleaned text can be piped.
pub fn run_clean(
    file: Option<&Path>,
    mode: Option<&str>,
    output: Option<&Path>,
    show_stats: bool,
) -> Result<()> {
    let config = config::load();
    let raw = read_input(file)?;

    let start = Instant::now();
    let report = clean_with(&raw, mode, &config)?;
    logger::log_clean_run(
        &config.logging,
        RunSource::Cli,
        &report,
        raw.len(),
        start.elapsed(),
    );

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", report.text))
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{} Cleaned lyrics written to {}", "✓".green().bold(), path.display());
        }
        None => println!("{}", report.text),
    }

    if show_stats {
        let digits = config.cleaning.digits;
        eprintln!();
        eprintln!("{}", stats_line("Input: ", report.before, digits).dimmed());
        eprintln!("{}", stats_line("Output:", report.after, digits).dimmed());
        eprintln!(
            "{}",
            format!(
                "Mode: {} · blank lines removed: {}",
                report.mode,
                digits.render(report.blank_lines_removed)
            )
            .dimmed()
        );
    }

    Ok(())
}

fn stats_line(label: &str, stats: TextStats, digits: DigitStyle) -> String {
    format!(
        "{label} {} words, {} lines",
        digits.render(stats.words),
        digits.render(stats.lines)
    )
}

// ---------------------------------------------------------------------------
// gaan count
// ---------------------------------------------------------------------------

/// Print word and line counts of the text as-is.
pub fn run_count(file: Option<&Path>, ascii: bool) -> Result<()> {
    let config = config::load();
    let digits = if ascii {
        DigitStyle::Ascii
    } else {
        config.cleaning.digits
    };

    let stats = TextStats::from_text(&read_input(file)?);
    println!("  {} {}", "Words:".bold(), digits.render(stats.words));
    println!("  {} {}", "Lines:".bold(), digits.render(stats.lines));

    Ok(())
}

// ---------------------------------------------------------------------------
// gaan serve
// ---------------------------------------------------------------------------

/// Run the web app until interrupted.
pub fn run_serve(addr: Option<String>, open: bool) -> Result<()> {
    let config = config::load();
    let addr = addr.unwrap_or_else(|| config.server.addr.clone());
    let open = open || config.server.open_browser;

    let state = web::AppState::from_config(config)?;
    web::serve(&addr, state, open)
}

// ---------------------------------------------------------------------------
// gaan artist ...
// ---------------------------------------------------------------------------

/// List all artists.
pub fn run_artist_list(format: OutputFormat) -> Result<()> {
    let catalog = open_catalog(&config::load())?;
    let artists = catalog.list();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&artists)?);
        return Ok(());
    }

    if artists.is_empty() {
        println!(
            "{}",
            "No artists yet. Add one with `gaan artist add --name ...`.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Csv => {
            println!("id,name,genre,country,songs");
            for a in &artists {
                println!(
                    "{},{},{},{},{}",
                    a.id,
                    csv_field(&a.name),
                    a.genre.map(|g| g.label()).unwrap_or_default(),
                    a.country.map(|c| c.label()).unwrap_or_default(),
                    a.songs.len()
                );
            }
        }
        _ => {
            println!("{}", "Artists".bold().cyan());
            println!("{}", "=".repeat(72));
            println!(
                "  {:<24} {:<28} {:<16} {:>5}",
                "ID", "Name", "Genre", "Songs"
            );
            println!("  {}", "-".repeat(70));
            for (i, a) in artists.iter().enumerate() {
                let line = format!(
                    "  {:<24} {:<28} {:<16} {:>5}",
                    a.id,
                    truncate(&a.name, 28),
                    a.genre.map(|g| g.label()).unwrap_or("-"),
                    a.songs.len()
                );
                if i % 2 == 0 {
                    println!("{line}");
                } else {
                    println!("{}", line.dimmed());
                }
            }
        }
    }

    Ok(())
}

/// Show one artist with their songs.
pub fn run_artist_show(id: &str) -> Result<()> {
    let catalog = open_catalog(&config::load())?;
    let artist = catalog.get(id)?;
    print_artist(&artist);
    Ok(())
}

fn print_artist(artist: &Artist) {
    println!("{}", artist.name.bold().cyan());
    println!("{}", "=".repeat(50));
    print_field("ID", &artist.id);
    if let Some(genre) = artist.genre {
        print_field("Genre", genre.label());
    }
    if let Some(country) = artist.country {
        print_field("Country", country.label());
    }
    if let Some(date) = artist.birth_date {
        print_field("Born", &date.to_string());
    }
    if let Some(image) = &artist.image {
        print_field("Image", image);
    }
    if let Some(bio) = &artist.biography {
        println!();
        println!("  {bio}");
    }

    println!();
    if artist.songs.is_empty() {
        println!("  {}", "No songs yet.".dimmed());
        return;
    }
    println!("{}", "Songs".bold().cyan());
    for song in &artist.songs {
        let mut detail = Vec::new();
        if let Some(album) = &song.album {
            detail.push(album.clone());
        }
        if let Some(date) = song.release_date {
            detail.push(date.to_string());
        }
        println!(
            "  {} {:<32} {}",
            "·".dimmed(),
            song.title,
            format!("{}  [{}]", detail.join(", "), song.id).dimmed()
        );
    }
}

fn print_field(name: &str, value: &str) {
    println!("  {} {}", format!("{name:<8}").bold(), value);
}

/// Add an artist to the catalog.
pub fn run_artist_add(input: ArtistInput) -> Result<()> {
    let mut catalog = open_catalog(&config::load())?;
    let artist = catalog.create(input)?;
    println!(
        "{} Added {} ({})",
        "✓".green().bold(),
        artist.name.bold(),
        artist.id
    );
    Ok(())
}

/// Remove an artist and their songs.
pub fn run_artist_remove(id: &str) -> Result<()> {
    let mut catalog = open_catalog(&config::load())?;
    catalog.delete(id)?;
    println!("{} Artist {} deleted", "✓".green().bold(), id);
    Ok(())
}

/// Credit a song to an artist.
pub fn run_song_add(artist_id: &str, input: SongInput) -> Result<()> {
    let mut catalog = open_catalog(&config::load())?;
    let song = catalog.add_song(artist_id, input)?;
    println!(
        "{} Added {} ({})",
        "✓".green().bold(),
        song.title.bold(),
        song.id
    );
    Ok(())
}

/// Remove a song from an artist.
pub fn run_song_remove(artist_id: &str, song_id: &str) -> Result<()> {
    let mut catalog = open_catalog(&config::load())?;
    catalog.remove_song(artist_id, song_id)?;
    println!("{} Song {} deleted", "✓".green().bold(), song_id);
    Ok(())
}

// ---------------------------------------------------------------------------
// gaan history
// ---------------------------------------------------------------------------

/// Show cleaning history from the analytics log.
pub fn run_history(days: u32, format: OutputFormat) -> Result<()> {
    let config = config::load();
    let path = logger::log_path(&config.logging);
    let summary = reporter::compute_summary(&path, Some(days));
    let daily = reporter::compute_daily(&path, days);

    if summary.runs == 0 {
        println!(
            "{}",
            format!("No cleaning runs in the last {days} days.").yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "days": days,
                "summary": summary,
                "daily": daily,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => print_history_csv(&daily),
        OutputFormat::Table => print_history_table(&summary, &daily, days),
    }

    Ok(())
}

fn print_history_table(summary: &HistorySummary, daily: &[DailyEntry], days: u32) {
    println!(
        "{}",
        format!("gaan History — Last {days} Days").bold().cyan()
    );
    println!("{}", "=".repeat(50));
    println!("  {} {}", "Runs:              ".bold(), format_number(summary.runs));
    println!(
        "  {} {} → {}",
        "Words:             ".bold(),
        format_number(summary.input_words),
        format_number(summary.output_words)
    );
    println!(
        "  {} {}",
        "Blank lines removed:".bold(),
        format_number(summary.blank_lines_removed)
    );
    let modes = summary
        .by_mode
        .iter()
        .map(|(mode, n)| format!("{mode}: {n}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("  {} {}", "Modes:             ".bold(), modes);
    println!();

    println!(
        "  {:<12} {:>6} {:>14} {:>12}",
        "Date", "Runs", "Blank removed", "Avg time"
    );
    println!("  {}", "-".repeat(48));
    for entry in daily {
        println!(
            "  {:<12} {:>6} {:>14} {:>10.0}µs",
            entry.date, entry.runs, entry.blank_lines_removed, entry.avg_duration_us
        );
    }
}

fn print_history_csv(daily: &[DailyEntry]) {
    println!("date,runs,blank_lines_removed,avg_duration_us");
    for entry in daily {
        println!(
            "{},{},{},{:.1}",
            entry.date, entry.runs, entry.blank_lines_removed, entry.avg_duration_us
        );
    }
}

// ---------------------------------------------------------------------------
// gaan config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective gaan Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.gaan/config.toml", global_exists);
    print_source(".gaan.toml", project_exists);
    println!("  {} {}", "·".dimmed(), "GAAN_* environment variables".dimmed());

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.gaan/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    println!("  {}", "Edit the file to customize gaan.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    let path = config::set_config_value(key, value)?;
    println!(
        "{} Set {} = {} in {}",
        "✓".green().bold(),
        key.bold(),
        value,
        path.display()
    );
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Truncate a string to `max_chars` characters, appending "…" if truncated.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Quote a CSV field when it contains a separator or quote.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("রবীন্দ্রনাথ", 4), "রবী…");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Lalon"), "Lalon");
        assert_eq!(csv_field("Lalon, Fakir"), "\"Lalon, Fakir\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn clean_with_uses_configured_mode() {
        let mut config = GaanConfig::default();
        config.cleaning.blank_lines = BlankLineMode::RemoveAll;
        let report = clean_with("এক\n\nদুই", None, &config).unwrap();
        assert_eq!(report.text, "এক\nদুই");
    }

    #[test]
    fn clean_with_mode_override() {
        let report = clean_with("এক\n\n\nদুই", Some("single"), &GaanConfig::default()).unwrap();
        assert_eq!(report.text, "এক\n\nদুই");
        assert!(clean_with("এক", Some("bogus"), &GaanConfig::default()).is_err());
    }

    #[test]
    fn stats_line_renders_digits() {
        let stats = TextStats { words: 12, lines: 3 };
        assert_eq!(
            stats_line("Input:", stats, DigitStyle::Bengali),
            "Input: ১২ words, ৩ lines"
        );
        assert_eq!(
            stats_line("Input:", stats, DigitStyle::Ascii),
            "Input: 12 words, 3 lines"
        );
    }

    #[test]
    fn read_input_from_file() {
        let path = std::env::temp_dir().join(format!("gaan-cli-input-{}.txt", std::process::id()));
        fs::write(&path, "আজি মেঘ").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "আজি মেঘ");
        let _ = fs::remove_file(&path);
        assert!(read_input(Some(&path)).is_err());
    }
}
