//! Embedded web app for gaan.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page lyric cleaner with an artist manager
//! - JSON API endpoints for cleaning, text statistics, the artist catalog,
//!   cleaning history, config, and health
//!
//! Launched via `gaan serve` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::catalog::Catalog;
use crate::config::GaanConfig;
use crate::utils::paths;

// ---------------------------------------------------------------------------
// Server state
// ---------------------------------------------------------------------------

/// Everything a request handler can touch. Requests are handled one at a
/// time, so handlers get exclusive access.
#[derive(Debug)]
pub struct AppState {
    pub config: GaanConfig,
    pub catalog: Catalog,
}

impl AppState {
    /// Open the configured catalog.
    pub fn from_config(config: GaanConfig) -> Result<Self> {
        let catalog_path = paths::expand_home(&config.catalog.path);
        let catalog = Catalog::open(&catalog_path)
            .with_context(|| format!("failed to open catalog at {}", catalog_path.display()))?;
        Ok(Self { config, catalog })
    }
}

/// A handler's answer, converted into a `tiny_http` response by [`serve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

impl ApiReply {
    /// Serialize `data` as a JSON reply.
    pub fn json<T: Serialize>(status: u16, data: &T) -> Result<Self> {
        let body = serde_json::to_vec(data).context("failed to serialize JSON response")?;
        Ok(Self {
            status,
            content_type: JSON_CONTENT_TYPE,
            body,
        })
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: JSON_CONTENT_TYPE,
            body: serde_json::json!({ "error": message }).to_string().into_bytes(),
        }
    }

    fn html(html: &str) -> Self {
        Self {
            status: 200,
            content_type: HTML_CONTENT_TYPE,
            body: html.as_bytes().to_vec(),
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response =
            Response::from_data(self.body).with_status_code(StatusCode(self.status));
        if let Ok(header) = Header::from_bytes("Content-Type", self.content_type) {
            response = response.with_header(header);
        }
        response
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web server on `addr`.
///
/// Blocks the current thread. Handles requests sequentially and turns any
/// handler error into a 500 reply without stopping the server.
pub fn serve(addr: &str, mut state: AppState, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("gaan running at http://{addr}");
    if let Some(path) = state.catalog.path() {
        println!("catalog: {} ({} artists)", path.display(), state.catalog.len());
    }
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let reply = dispatch(&method, &url, body.as_deref(), &mut state).unwrap_or_else(|e| {
            eprintln!("error handling {method} {url}: {e:#}");
            ApiReply::error(500, &e.to_string())
        });
        let status = reply.status;

        let _ = request.respond(reply.into_response());

        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Route a request to its handler.
pub fn dispatch(
    method: &Method,
    url: &str,
    body: Option<&str>,
    state: &mut AppState,
) -> Result<ApiReply> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let body = body.unwrap_or("");

    match (method, segments.as_slice()) {
        // Frontend
        (Method::Get, [""] | ["index.html"]) => Ok(ApiReply::html(frontend::INDEX_HTML)),

        // API — Lyrics
        (Method::Post, ["api", "clean"]) => api::post_clean(body, state),
        (Method::Post, ["api", "stats"]) => api::post_stats(body, state),

        // API — Artists
        (Method::Get, ["api", "artists"]) => api::list_artists(state),
        (Method::Post, ["api", "artists"]) => api::create_artist(body, state),
        (Method::Get, ["api", "artists", id]) => api::get_artist(id, state),
        (Method::Put, ["api", "artists", id]) => api::update_artist(id, body, state),
        (Method::Delete, ["api", "artists", id]) => api::delete_artist(id, state),

        // API — Songs
        (Method::Post, ["api", "artists", id, "songs"]) => api::add_song(id, body, state),
        (Method::Delete, ["api", "artists", id, "songs", song_id]) => {
            api::remove_song(id, song_id, state)
        }

        // API — History, config, health
        (Method::Get, ["api", "history"]) => api::get_history(url, state),
        (Method::Get, ["api", "config"]) => api::get_config(state),
        (Method::Get, ["api", "health"]) => api::get_health(state),

        // 404
        _ => Ok(ApiReply::error(404, "not found")),
    }
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

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
    fn serves_frontend() {
        let reply = dispatch(&Method::Get, "/", None, &mut state()).unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, HTML_CONTENT_TYPE);
        assert!(String::from_utf8_lossy(&reply.body).contains("<!DOCTYPE html>"));
    }

    #[test]
    fn unknown_route_is_404() {
        let reply = dispatch(&Method::Get, "/api/nothing", None, &mut state()).unwrap();
        assert_eq!(reply.status, 404);
        assert_eq!(body_json(&reply)["error"], "not found");
    }

    #[test]
    fn clean_endpoint_returns_cleaned_text_and_stats() {
        let body = r#"{"text": "কথা।।\n\n\n\nআমার--তোমার--"}"#;
        let reply = dispatch(&Method::Post, "/api/clean", Some(body), &mut state()).unwrap();
        assert_eq!(reply.status, 200);

        let json = body_json(&reply);
        assert_eq!(json["cleaned"], "কথা\n\nআমার—তোমার");
        assert_eq!(json["mode"], "single-blank");
        assert_eq!(json["input"]["lines"], 2);
        assert_eq!(json["output"]["words"], 2);
        assert_eq!(json["output"]["words_display"], "২");
    }

    #[test]
    fn clean_endpoint_accepts_mode_override() {
        let body = r#"{"text": "A\n\nB\n\nC", "mode": "density-reduce"}"#;
        let reply = dispatch(&Method::Post, "/api/clean", Some(body), &mut state()).unwrap();
        assert_eq!(body_json(&reply)["cleaned"], "A\nB\nC");
    }

    #[test]
    fn clean_endpoint_rejects_unknown_mode() {
        let body = r#"{"text": "A", "mode": "sometimes"}"#;
        let reply = dispatch(&Method::Post, "/api/clean", Some(body), &mut state()).unwrap();
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn malformed_json_is_400() {
        let reply = dispatch(&Method::Post, "/api/clean", Some("{"), &mut state()).unwrap();
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn stats_endpoint_counts_words_and_lines() {
        let body = r#"{"text": "এক   দুই\tতিন\n\nচার"}"#;
        let reply = dispatch(&Method::Post, "/api/stats", Some(body), &mut state()).unwrap();
        let json = body_json(&reply);
        assert_eq!(json["words"], 4);
        assert_eq!(json["lines"], 2);
        assert_eq!(json["words_display"], "৪");
    }

    #[test]
    fn artist_crud_over_http() {
        let mut state = state();

        let reply = dispatch(&Method::Post, "/api/artists", Some(r#"{"name": ""}"#), &mut state)
            .unwrap();
        assert_eq!(reply.status, 400);
        assert_eq!(body_json(&reply)["error"], "Artist name is required");

        let reply = dispatch(
            &Method::Post,
            "/api/artists",
            Some(r#"{"name": "লালন", "genre": "লোকসঙ্গীত", "birthDate": "1774-10-17"}"#),
            &mut state,
        )
        .unwrap();
        assert_eq!(reply.status, 201);
        let created = body_json(&reply);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["birthDate"], "1774-10-17");

        let reply = dispatch(&Method::Get, "/api/artists", None, &mut state).unwrap();
        assert_eq!(body_json(&reply).as_array().unwrap().len(), 1);

        let reply = dispatch(
            &Method::Put,
            &format!("/api/artists/{id}"),
            Some(r#"{"name": "লালন সাঁই", "country": "বাংলাদেশ"}"#),
            &mut state,
        )
        .unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(body_json(&reply)["name"], "লালন সাঁই");

        let reply = dispatch(&Method::Get, &format!("/api/artists/{id}"), None, &mut state).unwrap();
        assert_eq!(body_json(&reply)["country"], "বাংলাদেশ");

        let reply =
            dispatch(&Method::Delete, &format!("/api/artists/{id}"), None, &mut state).unwrap();
        assert_eq!(body_json(&reply)["message"], "Artist deleted successfully");

        let reply = dispatch(&Method::Get, &format!("/api/artists/{id}"), None, &mut state).unwrap();
        assert_eq!(reply.status, 404);
        assert_eq!(body_json(&reply)["error"], "Artist not found");
    }

    #[test]
    fn song_routes() {
        let mut state = state();
        let reply = dispatch(&Method::Post, "/api/artists", Some(r#"{"name": "Lalon"}"#), &mut state)
            .unwrap();
        let id = body_json(&reply)["id"].as_str().unwrap().to_string();

        let reply = dispatch(
            &Method::Post,
            &format!("/api/artists/{id}/songs"),
            Some(r#"{"title": "Khachar Bhitor Ochin Pakhi", "releaseDate": ""}"#),
            &mut state,
        )
        .unwrap();
        assert_eq!(reply.status, 201);
        let song_id = body_json(&reply)["id"].as_str().unwrap().to_string();

        let reply = dispatch(
            &Method::Delete,
            &format!("/api/artists/{id}/songs/{song_id}"),
            None,
            &mut state,
        )
        .unwrap();
        assert_eq!(reply.status, 200);

        let reply = dispatch(
            &Method::Post,
            "/api/artists/missing/songs",
            Some(r#"{"title": "x"}"#),
            &mut state,
        )
        .unwrap();
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn health_reports_catalog_size() {
        let reply = dispatch(&Method::Get, "/api/health", None, &mut state()).unwrap();
        let json = body_json(&reply);
        assert_eq!(json["artists"], 0);
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
