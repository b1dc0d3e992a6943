/// Configuration schema and defaults for gaan.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[cleaning]`, `[server]`, `[catalog]` and `[logging]`.
///
/// Every field has a built-in default, so a config file only needs the keys
/// it wants to change.
use serde::{Deserialize, Serialize};

use crate::cleaning::{BlankLineMode, DigitStyle};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level gaan configuration.
///
/// Maps directly to `~/.gaan/config.toml` and `.gaan.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaanConfig {
    pub cleaning: CleaningConfig,
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [cleaning]
// ---------------------------------------------------------------------------

/// Lyric cleaning defaults. Callers may override the mode per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Blank-line strategy: `single-blank`, `density-reduce`, `remove-all`.
    pub blank_lines: BlankLineMode,
    /// Rewrite internal `--` as an em-dash.
    pub em_dash: bool,
    /// Digit script for displayed counts: `bengali` or `ascii`.
    pub digits: DigitStyle,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            blank_lines: BlankLineMode::SingleBlank,
            em_dash: true,
            digits: DigitStyle::Bengali,
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `gaan serve`.
    pub addr: String,
    /// Open the frontend in the default browser on startup.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: false,
        }
    }
}

// ---------------------------------------------------------------------------
// [catalog]
// ---------------------------------------------------------------------------

/// Artist/song catalog storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file holding the catalog. `~` expands to the home directory.
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "~/.gaan/catalog.json".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Cleaning-run analytics log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append one JSON line per cleaning run.
    pub enabled: bool,
    /// JSONL log file. `~` expands to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.gaan/clean-log.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotated template
// ---------------------------------------------------------------------------

impl GaanConfig {
    /// The annotated default config written by `gaan config init`.
    pub fn default_toml() -> String {
        r#"# gaan configuration
# Precedence (lowest to highest): built-in defaults, ~/.gaan/config.toml,
# .gaan.toml in the working directory, GAAN_* environment variables.

[cleaning]
blank_lines = "single-blank"          # "single-blank", "density-reduce" or "remove-all"
em_dash = true                        # Rewrite internal "--" as an em-dash
digits = "bengali"                    # Digit script for counts: "bengali" or "ascii"

[server]
addr = "127.0.0.1:9747"
open_browser = false

[catalog]
path = "~/.gaan/catalog.json"

[logging]
enabled = true
path = "~/.gaan/clean-log.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = GaanConfig::default();
        assert_eq!(config.cleaning.blank_lines, BlankLineMode::SingleBlank);
        assert!(config.cleaning.em_dash);
        assert_eq!(config.cleaning.digits, DigitStyle::Bengali);
        assert_eq!(config.server.addr, "127.0.0.1:9747");
        assert!(!config.server.open_browser);
        assert_eq!(config.catalog.path, "~/.gaan/catalog.json");
        assert!(config.logging.enabled);
    }

    #[test]
    fn deserialize_minimal_toml() {
        let toml_str = r#"
[cleaning]
blank_lines = "density-reduce"
"#;
        let config: GaanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cleaning.blank_lines, BlankLineMode::DensityReduce);
        // Everything else falls back to defaults
        assert!(config.cleaning.em_dash);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn deserialize_full_toml() {
        let toml_str = r#"
[cleaning]
blank_lines = "remove-all"
em_dash = false
digits = "ascii"

[server]
addr = "0.0.0.0:8080"
open_browser = true

[catalog]
path = "/srv/gaan/catalog.json"

[logging]
enabled = false
path = "/tmp/gaan.jsonl"
"#;
        let config: GaanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cleaning.blank_lines, BlankLineMode::RemoveAll);
        assert!(!config.cleaning.em_dash);
        assert_eq!(config.cleaning.digits, DigitStyle::Ascii);
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert!(config.server.open_browser);
        assert_eq!(config.catalog.path, "/srv/gaan/catalog.json");
        assert!(!config.logging.enabled);
        assert_eq!(config.logging.path, "/tmp/gaan.jsonl");
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let toml_str = r#"
[cleaning]
blank_lines = "sometimes"
"#;
        assert!(toml::from_str::<GaanConfig>(toml_str).is_err());
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let config: GaanConfig = toml::from_str("").unwrap();
        assert_eq!(config, GaanConfig::default());
    }

    #[test]
    fn default_toml_parses_back_to_defaults() {
        let config: GaanConfig = toml::from_str(&GaanConfig::default_toml()).unwrap();
        assert_eq!(config, GaanConfig::default());
    }
}
