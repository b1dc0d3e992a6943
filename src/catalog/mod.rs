//! Artist and song catalog.
//!
//! Holds the typed [`Artist`]/[`Song`] records behind the CRUD endpoints and
//! persists them as a single JSON document. Every mutation is written to a
//! sibling temp file and renamed into place, so a crash never leaves a
//! half-written catalog behind.
//!
//! A catalog opened with [`Catalog::in_memory`] never touches the disk.

pub mod model;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use model::{Artist, ArtistInput, Country, Genre, Song, SongInput};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("{0}")]
    Invalid(String),
    #[error("catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    fn artist_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "Artist",
            id: id.to_string(),
        }
    }

    fn song_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "Song",
            id: id.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// On-disk document
// ---------------------------------------------------------------------------

const CATALOG_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    version: u32,
    #[serde(default)]
    artists: Vec<Artist>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Catalog {
    path: Option<PathBuf>,
    artists: Vec<Artist>,
}

impl Catalog {
    /// A catalog that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the catalog stored at `path`. A missing file is an empty catalog;
    /// the file is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let artists = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str::<CatalogFile>(&content)?.artists
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            artists,
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All artists ordered by name, each with their songs.
    pub fn list(&self) -> Vec<Artist> {
        let mut artists = self.artists.clone();
        artists.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        artists
    }

    /// One artist, with songs ordered by title.
    pub fn get(&self, id: &str) -> Result<Artist, CatalogError> {
        let mut artist = self
            .artists
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::artist_not_found(id))?;
        artist
            .songs
            .sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        Ok(artist)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create an artist. A name is required.
    pub fn create(&mut self, input: ArtistInput) -> Result<Artist, CatalogError> {
        let fields = input.validate()?;
        let name = fields
            .name
            .ok_or_else(|| CatalogError::Invalid("Artist name is required".to_string()))?;

        let now = Utc::now();
        let artist = Artist {
            id: next_id("art"),
            name,
            biography: fields.biography,
            birth_date: fields.birth_date,
            genre: fields.genre,
            country: fields.country,
            image: fields.image,
            created_at: now,
            updated_at: now,
            songs: Vec::new(),
        };

        let mut next = self.artists.clone();
        next.push(artist.clone());
        self.commit(next)?;

        Ok(artist)
    }

    /// Replace an artist's details. An absent name keeps the current one;
    /// every other field takes the submitted value, absent meaning cleared.
    pub fn update(&mut self, id: &str, input: ArtistInput) -> Result<Artist, CatalogError> {
        let fields = input.validate()?;

        let mut next = self.artists.clone();
        let artist = next
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::artist_not_found(id))?;

        if let Some(name) = fields.name {
            artist.name = name;
        }
        artist.biography = fields.biography;
        artist.birth_date = fields.birth_date;
        artist.genre = fields.genre;
        artist.country = fields.country;
        artist.image = fields.image;
        artist.updated_at = Utc::now();

        let updated = artist.clone();
        self.commit(next)?;

        Ok(updated)
    }

    /// Delete an artist together with their songs.
    pub fn delete(&mut self, id: &str) -> Result<(), CatalogError> {
        if !self.artists.iter().any(|a| a.id == id) {
            return Err(CatalogError::artist_not_found(id));
        }

        let next = self
            .artists
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();
        self.commit(next)
    }

    /// Credit a new song to an artist. A title is required.
    pub fn add_song(&mut self, artist_id: &str, input: SongInput) -> Result<Song, CatalogError> {
        let title = input
            .title
            .ok_or_else(|| CatalogError::Invalid("Song title is required".to_string()))?;
        let release_date = input
            .release_date
            .as_deref()
            .map(model::parse_date)
            .transpose()?;

        let mut next = self.artists.clone();
        let artist = next
            .iter_mut()
            .find(|a| a.id == artist_id)
            .ok_or_else(|| CatalogError::artist_not_found(artist_id))?;

        let song = Song {
            id: next_id("song"),
            title,
            album: input.album,
            release_date,
        };
        artist.songs.push(song.clone());
        artist.updated_at = Utc::now();

        self.commit(next)?;

        Ok(song)
    }

    /// Remove one song from an artist.
    pub fn remove_song(&mut self, artist_id: &str, song_id: &str) -> Result<(), CatalogError> {
        let mut next = self.artists.clone();
        let artist = next
            .iter_mut()
            .find(|a| a.id == artist_id)
            .ok_or_else(|| CatalogError::artist_not_found(artist_id))?;

        let before = artist.songs.len();
        artist.songs.retain(|s| s.id != song_id);
        if artist.songs.len() == before {
            return Err(CatalogError::song_not_found(song_id));
        }
        artist.updated_at = Utc::now();

        self.commit(next)
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Persist `next` and only then make it the live state.
    fn commit(&mut self, next: Vec<Artist>) -> Result<(), CatalogError> {
        if let Some(path) = &self.path {
            write_catalog_file(path, &next)?;
        }
        self.artists = next;
        Ok(())
    }
}

fn write_catalog_file(path: &Path, artists: &[Artist]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let document = CatalogFile {
        version: CATALOG_VERSION,
        artists: artists.to_vec(),
    };
    let json = serde_json::to_string_pretty(&document)?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

static ID_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Time-ordered identifier: `<prefix>_<micros hex><sequence hex>`.
fn next_id(prefix: &str) -> String {
    let micros = Utc::now().timestamp_micros();
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xfff;
    format!("{prefix}_{micros:x}{seq:03x}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ArtistInput {
        ArtistInput {
            name: Some(name.to_string()),
            ..ArtistInput::default()
        }
    }

    fn titled(title: &str) -> SongInput {
        SongInput {
            title: Some(title.to_string()),
            ..SongInput::default()
        }
    }

    #[test]
    fn create_requires_name() {
        let mut catalog = Catalog::in_memory();
        let err = catalog.create(ArtistInput::default()).unwrap_err();
        assert_eq!(err.to_string(), "Artist name is required");
        assert!(catalog.is_empty());
    }

    #[test]
    fn list_orders_by_name() {
        let mut catalog = Catalog::in_memory();
        catalog.create(named("Lalon")).unwrap();
        catalog.create(named("abbasuddin")).unwrap();
        catalog.create(named("Hason Raja")).unwrap();

        let names: Vec<_> = catalog.list().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["abbasuddin", "Hason Raja", "Lalon"]);
    }

    #[test]
    fn get_orders_songs_by_title() {
        let mut catalog = Catalog::in_memory();
        let artist = catalog.create(named("Lalon")).unwrap();
        catalog.add_song(&artist.id, titled("Milon Hobe Koto Dine")).unwrap();
        catalog.add_song(&artist.id, titled("Khachar Bhitor Ochin Pakhi")).unwrap();

        let titles: Vec<_> = catalog
            .get(&artist.id)
            .unwrap()
            .songs
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Khachar Bhitor Ochin Pakhi", "Milon Hobe Koto Dine"]);
    }

    #[test]
    fn get_unknown_artist_is_not_found() {
        let catalog = Catalog::in_memory();
        assert!(matches!(
            catalog.get("missing"),
            Err(CatalogError::NotFound { kind: "Artist", .. })
        ));
    }

    #[test]
    fn update_keeps_name_when_absent_and_clears_other_fields() {
        let mut catalog = Catalog::in_memory();
        let artist = catalog
            .create(ArtistInput {
                name: Some("Lalon".to_string()),
                biography: Some("Baul saint".to_string()),
                genre: Some("folk".to_string()),
                ..ArtistInput::default()
            })
            .unwrap();

        let updated = catalog
            .update(
                &artist.id,
                ArtistInput {
                    country: Some("বাংলাদেশ".to_string()),
                    ..ArtistInput::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Lalon");
        assert!(updated.biography.is_none());
        assert!(updated.genre.is_none());
        assert_eq!(updated.country, Some(Country::Bangladesh));
        assert!(updated.updated_at >= artist.updated_at);
        assert_eq!(updated.created_at, artist.created_at);
    }

    #[test]
    fn invalid_update_leaves_catalog_unchanged() {
        let mut catalog = Catalog::in_memory();
        let artist = catalog.create(named("Lalon")).unwrap();
        let result = catalog.update(
            &artist.id,
            ArtistInput {
                birth_date: Some("yesterday".to_string()),
                ..ArtistInput::default()
            },
        );
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
        assert_eq!(catalog.get(&artist.id).unwrap(), artist);
    }

    #[test]
    fn delete_removes_artist() {
        let mut catalog = Catalog::in_memory();
        let artist = catalog.create(named("Lalon")).unwrap();
        catalog.delete(&artist.id).unwrap();
        assert!(catalog.is_empty());
        assert!(matches!(
            catalog.delete(&artist.id),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn song_lifecycle() {
        let mut catalog = Catalog::in_memory();
        let artist = catalog.create(named("Lalon")).unwrap();

        assert!(matches!(
            catalog.add_song(&artist.id, SongInput::default()),
            Err(CatalogError::Invalid(_))
        ));

        let song = catalog
            .add_song(
                &artist.id,
                SongInput {
                    title: Some("Khachar Bhitor Ochin Pakhi".to_string()),
                    album: Some("Lalon Geeti".to_string()),
                    release_date: Some("1990-01-01".to_string()),
                },
            )
            .unwrap();
        assert_eq!(catalog.get(&artist.id).unwrap().songs, vec![song.clone()]);

        catalog.remove_song(&artist.id, &song.id).unwrap();
        assert!(catalog.get(&artist.id).unwrap().songs.is_empty());
        assert!(matches!(
            catalog.remove_song(&artist.id, &song.id),
            Err(CatalogError::NotFound { kind: "Song", .. })
        ));
    }

    #[test]
    fn ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..100).map(|_| next_id("art")).collect();
        assert_eq!(ids.len(), 100);
    }
}
