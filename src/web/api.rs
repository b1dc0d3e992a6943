//! JSON API handlers for the web app.
//!
//! Each handler corresponds to an API endpoint and returns an [`ApiReply`].
//! Client mistakes (bad JSON, unknown ids, failed validation) become 4xx
//! replies here; anything else propagates as an error and is answered with a
//! 500 by the server loop.

use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analytics::logger::{self, RunSource};
use crate::analytics::reporter::{self, DailyEntry, HistorySummary};
use crate::catalog::{ArtistInput, CatalogError, SongInput};
use crate::cleaning::{self, BlankLineMode, CleanOptions, DigitStyle, TextStats};
use crate::config::GaanConfig;

use super::{ApiReply, AppState};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CleanRequest {
    text: String,
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Deserialize)]
struct StatsRequest {
    text: String,
}

/// Word and line counts, raw and rendered for display.
#[derive(Debug, Serialize)]
struct StatsView {
    words: usize,
    lines: usize,
    words_display: String,
    lines_display: String,
}

impl StatsView {
    fn new(stats: TextStats, digits: DigitStyle) -> Self {
        Self {
            words: stats.words,
            lines: stats.lines,
            words_display: digits.render(stats.words),
            lines_display: digits.render(stats.lines),
        }
    }
}

#[derive(Serialize)]
struct CleanResponse {
    cleaned: String,
    mode: BlankLineMode,
    input: StatsView,
    output: StatsView,
    blank_lines_removed: usize,
}

#[derive(Serialize)]
struct HistoryResponse {
    days: Option<u32>,
    summary: HistorySummary,
    daily: Vec<DailyEntry>,
}

/// Config API response: the effective config as JSON plus the TOML text.
#[derive(Serialize)]
struct ConfigResponse<'a> {
    config: &'a GaanConfig,
    toml_text: String,
}

#[derive(Serialize)]
struct HealthResponse {
    version: &'static str,
    catalog_path: Option<String>,
    artists: usize,
    log_path: String,
    log_exists: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a JSON request body, or produce the 400 reply for it.
fn parse_body<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, ApiReply> {
    serde_json::from_str(body).map_err(|e| ApiReply::error(400, &format!("invalid JSON: {e}")))
}

/// Map a catalog failure to a reply; I/O and JSON failures stay errors.
fn catalog_failure(err: CatalogError) -> Result<ApiReply> {
    match err {
        CatalogError::NotFound { kind, .. } => {
            Ok(ApiReply::error(404, &format!("{kind} not found")))
        }
        CatalogError::Invalid(message) => Ok(ApiReply::error(400, &message)),
        other => Err(other).context("catalog operation failed"),
    }
}

/// Parse the `?days=N` query parameter from a URL.
fn parse_days_param(url: &str) -> Option<u32> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == "days" { v.parse().ok() } else { None }
    })
}

// ---------------------------------------------------------------------------
// Lyrics
// ---------------------------------------------------------------------------

/// `POST /api/clean` — run the cleaning pipeline on `{text, mode?}`.
pub fn post_clean(body: &str, state: &AppState) -> Result<ApiReply> {
    let req: CleanRequest = match parse_body(body) {
        Ok(req) => req,
        Err(reply) => return Ok(reply),
    };

    let mut options = CleanOptions::from(&state.config.cleaning);
    if let Some(mode) = req.mode.as_deref().filter(|m| !m.trim().is_empty()) {
        let Some(mode) = BlankLineMode::parse(mode) else {
            return Ok(ApiReply::error(400, &format!("unknown mode: {mode}")));
        };
        options.blank_lines = mode;
    }

    let start = Instant::now();
    let report = cleaning::clean_lyrics(&req.text, &options);
    logger::log_clean_run(
        &state.config.logging,
        RunSource::Web,
        &report,
        req.text.len(),
        start.elapsed(),
    );

    let digits = state.config.cleaning.digits;
    let resp = CleanResponse {
        mode: report.mode,
        input: StatsView::new(report.before, digits),
        output: StatsView::new(report.after, digits),
        blank_lines_removed: report.blank_lines_removed,
        cleaned: report.text,
    };

    ApiReply::json(200, &resp)
}

/// `POST /api/stats` — word and line counts of `{text}` as-is.
pub fn post_stats(body: &str, state: &AppState) -> Result<ApiReply> {
    let req: StatsRequest = match parse_body(body) {
        Ok(req) => req,
        Err(reply) => return Ok(reply),
    };

    let stats = TextStats::from_text(&req.text);
    ApiReply::json(200, &StatsView::new(stats, state.config.cleaning.digits))
}

// ---------------------------------------------------------------------------
// Artists
// ---------------------------------------------------------------------------

/// `GET /api/artists`
pub fn list_artists(state: &AppState) -> Result<ApiReply> {
    ApiReply::json(200, &state.catalog.list())
}

/// `POST /api/artists`
pub fn create_artist(body: &str, state: &mut AppState) -> Result<ApiReply> {
    let input: ArtistInput = match parse_body(body) {
        Ok(input) => input,
        Err(reply) => return Ok(reply),
    };

    match state.catalog.create(input) {
        Ok(artist) => ApiReply::json(201, &artist),
        Err(e) => catalog_failure(e),
    }
}

/// `GET /api/artists/{id}`
pub fn get_artist(id: &str, state: &AppState) -> Result<ApiReply> {
    match state.catalog.get(id) {
        Ok(artist) => ApiReply::json(200, &artist),
        Err(e) => catalog_failure(e),
    }
}

/// `PUT /api/artists/{id}`
pub fn update_artist(id: &str, body: &str, state: &mut AppState) -> Result<ApiReply> {
    let input: ArtistInput = match parse_body(body) {
        Ok(input) => input,
        Err(reply) => return Ok(reply),
    };

    match state.catalog.update(id, input) {
        Ok(artist) => ApiReply::json(200, &artist),
        Err(e) => catalog_failure(e),
    }
}

/// `DELETE /api/artists/{id}`
pub fn delete_artist(id: &str, state: &mut AppState) -> Result<ApiReply> {
    match state.catalog.delete(id) {
        Ok(()) => ApiReply::json(
            200,
            &serde_json::json!({ "message": "Artist deleted successfully" }),
        ),
        Err(e) => catalog_failure(e),
    }
}

// ---------------------------------------------------------------------------
// Songs
// ---------------------------------------------------------------------------

/// `POST /api/artists/{id}/songs`
pub fn add_song(artist_id: &str, body: &str, state: &mut AppState) -> Result<ApiReply> {
    let input: SongInput = match parse_body(body) {
        Ok(input) => input,
        Err(reply) => return Ok(reply),
    };

    match state.catalog.add_song(artist_id, input) {
        Ok(song) => ApiReply::json(201, &song),
        Err(e) => catalog_failure(e),
    }
}

/// `DELETE /api/artists/{id}/songs/{song_id}`
pub fn remove_song(artist_id: &str, song_id: &str, state: &mut AppState) -> Result<ApiReply> {
    match state.catalog.remove_song(artist_id, song_id) {
        Ok(()) => ApiReply::json(
            200,
            &serde_json::json!({ "message": "Song deleted successfully" }),
        ),
        Err(e) => catalog_failure(e),
    }
}

// ---------------------------------------------------------------------------
// History, config, health
// ---------------------------------------------------------------------------

/// `GET /api/history?days=N` — cleaning history summary and daily breakdown.
pub fn get_history(url: &str, state: &AppState) -> Result<ApiReply> {
    let days = parse_days_param(url);
    let path = logger::log_path(&state.config.logging);

    let resp = HistoryResponse {
        days,
        summary: reporter::compute_summary(&path, days),
        daily: reporter::compute_daily(&path, days.unwrap_or(30)),
    };

    ApiReply::json(200, &resp)
}

/// `GET /api/config` — current effective configuration.
pub fn get_config(state: &AppState) -> Result<ApiReply> {
    let toml_text =
        toml::to_string_pretty(&state.config).context("failed to serialize config as TOML")?;

    ApiReply::json(
        200,
        &ConfigResponse {
            config: &state.config,
            toml_text,
        },
    )
}

/// `GET /api/health` — version, catalog and log status.
pub fn get_health(state: &AppState) -> Result<ApiReply> {
    let log_path = logger::log_path(&state.config.logging);

    let resp = HealthResponse {
        version: env!("CARGO_PKG_VERSION"),
        catalog_path: state
            .catalog
            .path()
            .map(|p| p.to_string_lossy().into_owned()),
        artists: state.catalog.len(),
        log_exists: log_path.exists(),
        log_path: log_path.to_string_lossy().into_owned(),
    };

    ApiReply::json(200, &resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn state() -> AppState {
        let mut config = GaanConfig::default();
        config.logging.enabled = false;
        AppState {
            config,
            catalog: Catalog::in_memory(),
        }
    }

    fn body_json(reply: &ApiReply) -> serde_json::Value {
        serde_json::from_slice(&reply.body).unwrap()
    }

    #[test]
    fn parse_days_param_extracts_value() {
        assert_eq!(parse_days_param("/api/history?days=7"), Some(7));
        assert_eq!(parse_days_param("/api/history?foo=bar&days=14"), Some(14));
    }

    #[test]
    fn parse_days_param_returns_none_for_missing_or_invalid() {
        assert_eq!(parse_days_param("/api/history"), None);
        assert_eq!(parse_days_param("/api/history?days=abc"), None);
        assert_eq!(parse_days_param("/api/history?days="), None);
    }

    #[test]
    fn stats_view_renders_configured_digits() {
        let stats = TextStats { words: 205, lines: 12 };
        let bengali = StatsView::new(stats, DigitStyle::Bengali);
        assert_eq!(bengali.words_display, "২০৫");
        assert_eq!(bengali.lines_display, "১২");

        let ascii = StatsView::new(stats, DigitStyle::Ascii);
        assert_eq!(ascii.words_display, "205");
    }

    #[test]
    fn clean_uses_ascii_digits_when_configured() {
        let mut state = state();
        state.config.cleaning.digits = DigitStyle::Ascii;
        let reply = post_clean(r#"{"text": "এক দুই তিন"}"#, &state).unwrap();
        assert_eq!(body_json(&reply)["output"]["words_display"], "3");
    }

    #[test]
    fn blank_mode_string_falls_back_to_config() {
        let reply = post_clean(r#"{"text": "A\n\n\nB", "mode": ""}"#, &state()).unwrap();
        let json = body_json(&reply);
        assert_eq!(json["mode"], "single-blank");
        assert_eq!(json["cleaned"], "A\n\nB");
        assert_eq!(json["blank_lines_removed"], 1);
    }

    #[test]
    fn missing_text_field_is_400() {
        let reply = post_stats(r#"{"body": "x"}"#, &state()).unwrap();
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn invalid_date_is_400() {
        let mut state = state();
        let reply =
            create_artist(r#"{"name": "Lalon", "birthDate": "someday"}"#, &mut state).unwrap();
        assert_eq!(reply.status, 400);
        assert!(state.catalog.is_empty());
    }

    #[test]
    fn unknown_song_is_404() {
        let mut state = state();
        let reply = create_artist(r#"{"name": "Lalon"}"#, &mut state).unwrap();
        let id = body_json(&reply)["id"].as_str().unwrap().to_string();

        let reply = remove_song(&id, "song_missing", &mut state).unwrap();
        assert_eq!(reply.status, 404);
        assert_eq!(body_json(&reply)["error"], "Song not found");
    }

    #[test]
    fn config_includes_toml_text() {
        let reply = get_config(&state()).unwrap();
        let json = body_json(&reply);
        assert_eq!(json["config"]["server"]["addr"], "127.0.0.1:9747");
        assert!(json["toml_text"].as_str().unwrap().contains("[cleaning]"));
    }
}
