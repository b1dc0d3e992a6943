use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gaan::catalog::{ArtistInput, SongInput};
use gaan::cli;

#[derive(Debug, Parser)]
#[command(name = "gaan")]
#[command(about = "Clean Bengali song lyrics and manage an artist catalog")]
#[command(version)]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Clean lyrics from a file (or stdin) and print the result
    Clean {
        /// Lyrics file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Blank-line mode: single-blank, density-reduce, remove-all
        #[arg(long)]
        mode: Option<String>,
        /// Write the cleaned lyrics to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Print word/line statistics to stderr
        #[arg(long)]
        stats: bool,
    },
    /// Count words and lines
    Count {
        /// Text file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Print ASCII digits instead of the configured style
        #[arg(long)]
        ascii: bool,
    },
    /// Start the web app
    Serve {
        /// Listen address (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Open the app in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Manage the artist catalog
    Artist {
        #[command(subcommand)]
        action: ArtistAction,
    },
    /// Show cleaning history
    History {
        /// Number of days to include (default: 30)
        #[arg(long, default_value = "30")]
        days: u32,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ArtistAction {
    /// List all artists
    List {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one artist and their songs
    Show { id: String },
    /// Add an artist
    Add {
        #[arg(long)]
        name: String,
        /// Genre (Bengali label or slug, e.g. `folk`)
        #[arg(long)]
        genre: Option<String>,
        /// Country (Bengali label or slug, e.g. `bangladesh`)
        #[arg(long)]
        country: Option<String>,
        /// Birth date, YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long)]
        biography: Option<String>,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove an artist and their songs
    Remove { id: String },
    /// Credit a song to an artist
    SongAdd {
        artist_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        album: Option<String>,
        /// Release date, YYYY-MM-DD
        #[arg(long)]
        release_date: Option<String>,
    },
    /// Remove a song from an artist
    SongRemove { artist_id: String, song_id: String },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default config to ~/.gaan/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a config value, e.g. `cleaning.blank_lines remove-all`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

/// Blank CLI values count as absent, like empty form fields.
fn non_empty(val: Option<String>) -> Option<String> {
    val.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Clean {
            file,
            mode,
            output,
            stats,
        } => cli::run_clean(file.as_deref(), mode.as_deref(), output.as_deref(), stats),
        Commands::Count { file, ascii } => cli::run_count(file.as_deref(), ascii),
        Commands::Serve { addr, open } => cli::run_serve(addr, open),
        Commands::Artist { action } => match action {
            ArtistAction::List { format } => {
                cli::run_artist_list(cli::OutputFormat::from_str_opt(Some(&format)))
            }
            ArtistAction::Show { id } => cli::run_artist_show(&id),
            ArtistAction::Add {
                name,
                genre,
                country,
                birth_date,
                biography,
                image,
            } => cli::run_artist_add(ArtistInput {
                name: non_empty(Some(name)),
                genre: non_empty(genre),
                country: non_empty(country),
                birth_date: non_empty(birth_date),
                biography: non_empty(biography),
                image: non_empty(image),
            }),
            ArtistAction::Remove { id } => cli::run_artist_remove(&id),
            ArtistAction::SongAdd {
                artist_id,
                title,
                album,
                release_date,
            } => cli::run_song_add(
                &artist_id,
                SongInput {
                    title: non_empty(Some(title)),
                    album: non_empty(album),
                    release_date: non_empty(release_date),
                },
            ),
            ArtistAction::SongRemove { artist_id, song_id } => {
                cli::run_song_remove(&artist_id, &song_id)
            }
        },
        Commands::History { days, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_history(days, fmt)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
