/// Configuration system for gaan.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — [`schema::GaanConfig::default()`]
/// 2. **User global config** — `~/.gaan/config.toml`
/// 3. **Project local config** — `.gaan.toml` in the current working directory
/// 4. **Environment variables** — `GAAN_*` overrides (highest precedence)
///
/// File layers are merged key by key: a file that only sets
/// `cleaning.blank_lines` leaves every other value from the layer below
/// untouched.
///
/// # Usage
///
/// ```rust,ignore
/// use gaan::config;
///
/// let cfg = config::load();
/// let options = gaan::cleaning::CleanOptions::from(&cfg.cleaning);
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cleaning::{BlankLineMode, DigitStyle};
use crate::utils::paths;

pub use schema::GaanConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Never fails: unreadable or malformed files are skipped and the remaining
/// layers still apply.
pub fn load() -> GaanConfig {
    let mut merged = toml::Value::try_from(GaanConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()));

    for path in [global_config_path(), project_config_path()] {
        if let Some(layer) = load_toml_value(path) {
            merge_values(&mut merged, layer);
        }
    }

    // A layer with a wrongly typed value poisons the merge; fall back to
    // defaults rather than half-applied files.
    let mut config: GaanConfig = merged.try_into().unwrap_or_default();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config
}

/// Read a TOML file as an untyped value.
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is not valid TOML.
fn load_toml_value(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Deep-merge `overlay` into `base`: tables merge per key, any other value
/// replaces what was there.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.gaan/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    paths::gaan_home().map(|dir| dir.join("config.toml"))
}

/// Path to the project local config: `.gaan.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".gaan.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `GAAN_BLANK_LINES` — `single-blank`, `density-reduce`, `remove-all`
/// - `GAAN_EM_DASH` — em-dash rewriting (`1`/`true`/`yes`/`on`)
/// - `GAAN_DIGITS` — `bengali` or `ascii`
/// - `GAAN_ADDR` — server listen address
/// - `GAAN_CATALOG_PATH` — catalog JSON file
/// - `GAAN_LOG` — analytics logging on/off
///
/// `lookup` resolves a variable name; [`load`] passes the process
/// environment.
fn apply_env_overrides(config: &mut GaanConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("GAAN_BLANK_LINES")
        && let Some(mode) = BlankLineMode::parse(&val)
    {
        config.cleaning.blank_lines = mode;
    }
    if let Some(val) = lookup("GAAN_EM_DASH") {
        config.cleaning.em_dash = is_truthy(&val);
    }
    if let Some(val) = lookup("GAAN_DIGITS")
        && let Some(style) = DigitStyle::parse(&val)
    {
        config.cleaning.digits = style;
    }
    if let Some(val) = lookup("GAAN_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Some(val) = lookup("GAAN_CATALOG_PATH")
        && !val.is_empty()
    {
        config.catalog.path = val;
    }
    if let Some(val) = lookup("GAAN_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.gaan/config.toml`.
///
/// Returns an error if the file already exists, unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.gaan/ directory")?;
    }

    fs::write(&path, GaanConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single key in the global config file.
///
/// Supports dotted keys like `cleaning.blank_lines`. When no global file
/// exists yet, the defaults are written out with the key applied. The
/// result is validated against the schema before anything is written.
pub fn set_config_value(key: &str, value: &str) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        toml::Value::try_from(GaanConfig::default())
            .context("failed to serialize default config")?
    };

    set_toml_value(&mut root, key, value)?;

    root.clone()
        .try_into::<GaanConfig>()
        .with_context(|| format!("invalid value for '{key}': {value}"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(path)
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// Missing sections are created. The new value takes the type of the value
/// it replaces; unknown leaves are stored as strings.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let (section_path, leaf) = match key.rsplit_once('.') {
        Some((sections, leaf)) => (Some(sections), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        anyhow::bail!("empty config key");
    }

    let mut current = root;
    for part in section_path.into_iter().flat_map(|s| s.split('.')) {
        let table = current
            .as_table_mut()
            .with_context(|| format!("'{part}' in '{key}' is not a section"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected a section above '{leaf}' in '{key}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Table(_)) => {
            anyhow::bail!("'{key}' is a section, not a value");
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
