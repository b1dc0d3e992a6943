//! Artist and song records, plus the loosely typed input payloads that are
//! validated into them.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::CatalogError;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Musical genre of an artist. Serialized with its Bengali label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "রবীন্দ্র সঙ্গীত")]
    RabindraSangeet,
    #[serde(rename = "নজরুল গীতি")]
    NazrulGeeti,
    #[serde(rename = "লোকসঙ্গীত")]
    Folk,
    #[serde(rename = "আধুনিক গান")]
    Modern,
    #[serde(rename = "ব্যান্ড সঙ্গীত")]
    Band,
    #[serde(rename = "ক্লাসিকাল")]
    Classical,
    #[serde(rename = "ভাওয়াইয়া")]
    Bhawaiya,
    #[serde(rename = "ভাটিয়ালি")]
    Bhatiali,
    #[serde(rename = "অন্যান্য")]
    Other,
}

impl Genre {
    pub const ALL: [Self; 9] = [
        Self::RabindraSangeet,
        Self::NazrulGeeti,
        Self::Folk,
        Self::Modern,
        Self::Band,
        Self::Classical,
        Self::Bhawaiya,
        Self::Bhatiali,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::RabindraSangeet => "রবীন্দ্র সঙ্গীত",
            Self::NazrulGeeti => "নজরুল গীতি",
            Self::Folk => "লোকসঙ্গীত",
            Self::Modern => "আধুনিক গান",
            Self::Band => "ব্যান্ড সঙ্গীত",
            Self::Classical => "ক্লাসিকাল",
            Self::Bhawaiya => "ভাওয়াইয়া",
            Self::Bhatiali => "ভাটিয়ালি",
            Self::Other => "অন্যান্য",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::RabindraSangeet => "rabindra-sangeet",
            Self::NazrulGeeti => "nazrul-geeti",
            Self::Folk => "folk",
            Self::Modern => "modern",
            Self::Band => "band",
            Self::Classical => "classical",
            Self::Bhawaiya => "bhawaiya",
            Self::Bhatiali => "bhatiali",
            Self::Other => "other",
        }
    }

    /// Accepts either the Bengali label or the English slug.
    pub fn parse(val: &str) -> Option<Self> {
        let val = val.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.label() == val || g.slug().eq_ignore_ascii_case(val))
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Country of an artist. Serialized with its Bengali label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "বাংলাদেশ")]
    Bangladesh,
    #[serde(rename = "ভারত")]
    India,
    #[serde(rename = "পাকিস্তান")]
    Pakistan,
    #[serde(rename = "যুক্তরাজ্য")]
    UnitedKingdom,
    #[serde(rename = "যুক্তরাষ্ট্র")]
    UnitedStates,
    #[serde(rename = "অন্যান্য")]
    Other,
}

impl Country {
    pub const ALL: [Self; 6] = [
        Self::Bangladesh,
        Self::India,
        Self::Pakistan,
        Self::UnitedKingdom,
        Self::UnitedStates,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bangladesh => "বাংলাদেশ",
            Self::India => "ভারত",
            Self::Pakistan => "পাকিস্তান",
            Self::UnitedKingdom => "যুক্তরাজ্য",
            Self::UnitedStates => "যুক্তরাষ্ট্র",
            Self::Other => "অন্যান্য",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Bangladesh => "bangladesh",
            Self::India => "india",
            Self::Pakistan => "pakistan",
            Self::UnitedKingdom => "united-kingdom",
            Self::UnitedStates => "united-states",
            Self::Other => "other",
        }
    }

    /// Accepts either the Bengali label or the English slug.
    pub fn parse(val: &str) -> Option<Self> {
        let val = val.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == val || c.slug().eq_ignore_ascii_case(val))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A song credited to an artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// An artist and the songs credited to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub country: Option<Country>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub songs: Vec<Song>,
}

// ---------------------------------------------------------------------------
// Input payloads
// ---------------------------------------------------------------------------

/// Artist fields as submitted by a client. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistInput {
    #[serde(deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub biography: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub birth_date: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub genre: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub country: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub image: Option<String>,
}

/// Song fields as submitted by a client. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongInput {
    #[serde(deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub album: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
}

/// Artist fields after validation. `name` stays optional so updates can
/// leave it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArtistFields {
    pub name: Option<String>,
    pub biography: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub genre: Option<Genre>,
    pub country: Option<Country>,
    pub image: Option<String>,
}

impl ArtistInput {
    pub(crate) fn validate(self) -> Result<ArtistFields, CatalogError> {
        let genre = self
            .genre
            .map(|g| Genre::parse(&g).ok_or_else(|| CatalogError::Invalid(format!("unknown genre '{g}'"))))
            .transpose()?;
        let country = self
            .country
            .map(|c| {
                Country::parse(&c).ok_or_else(|| CatalogError::Invalid(format!("unknown country '{c}'")))
            })
            .transpose()?;

        Ok(ArtistFields {
            name: self.name,
            biography: self.biography,
            birth_date: self.birth_date.as_deref().map(parse_date).transpose()?,
            genre,
            country,
            image: self.image,
        })
    }
}

/// Parse a calendar date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_date(val: &str) -> Result<NaiveDate, CatalogError> {
    let val = val.trim();
    NaiveDate::parse_from_str(val, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(val).map(|dt| dt.date_naive()))
        .map_err(|_| CatalogError::Invalid(format!("invalid date '{val}', expected YYYY-MM-DD")))
}

/// Deserialize an optional string, trimming it and mapping blank to `None`.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_parses_label_and_slug() {
        assert_eq!(Genre::parse("নজরুল গীতি"), Some(Genre::NazrulGeeti));
        assert_eq!(Genre::parse("Rabindra-Sangeet"), Some(Genre::RabindraSangeet));
        assert_eq!(Genre::parse("jazz"), None);
    }

    #[test]
    fn country_parses_label_and_slug() {
        assert_eq!(Country::parse("বাংলাদেশ"), Some(Country::Bangladesh));
        assert_eq!(Country::parse("united-states"), Some(Country::UnitedStates));
        assert_eq!(Country::parse("Atlantis"), None);
    }

    #[test]
    fn genre_serializes_as_bengali_label() {
        for genre in Genre::ALL {
            let json = serde_json::to_string(&genre).unwrap();
            assert_eq!(json, format!("\"{}\"", genre.label()));
        }
    }

    #[test]
    fn input_treats_empty_strings_as_absent() {
        let json = r#"{"name": "  লালন  ", "biography": "", "birthDate": "", "genre": "", "country": null}"#;
        let input: ArtistInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.name.as_deref(), Some("লালন"));
        assert!(input.biography.is_none());
        assert!(input.birth_date.is_none());
        assert!(input.genre.is_none());
        assert!(input.country.is_none());
        assert!(input.image.is_none());
    }

    #[test]
    fn validate_resolves_enums_and_dates() {
        let input = ArtistInput {
            name: Some("রবীন্দ্রনাথ ঠাকুর".to_string()),
            birth_date: Some("1861-05-07".to_string()),
            genre: Some("রবীন্দ্র সঙ্গীত".to_string()),
            country: Some("india".to_string()),
            ..ArtistInput::default()
        };
        let fields = input.validate().unwrap();
        assert_eq!(fields.birth_date, NaiveDate::from_ymd_opt(1861, 5, 7));
        assert_eq!(fields.genre, Some(Genre::RabindraSangeet));
        assert_eq!(fields.country, Some(Country::India));
    }

    #[test]
    fn validate_rejects_unknown_genre() {
        let input = ArtistInput {
            genre: Some("jazz".to_string()),
            ..ArtistInput::default()
        };
        assert!(matches!(input.validate(), Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn parse_date_accepts_rfc3339() {
        assert_eq!(
            parse_date("1899-05-25T00:00:00.000Z").unwrap(),
            NaiveDate::from_ymd_opt(1899, 5, 25).unwrap()
        );
        assert!(parse_date("25/05/1899").is_err());
    }

    #[test]
    fn artist_serializes_camel_case() {
        let now = Utc::now();
        let artist = Artist {
            id: "a1".to_string(),
            name: "লালন".to_string(),
            biography: None,
            birth_date: None,
            genre: Some(Genre::Folk),
            country: None,
            image: None,
            created_at: now,
            updated_at: now,
            songs: Vec::new(),
        };
        let json = serde_json::to_string(&artist).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"birthDate\":null"));
        assert!(json.contains("\"genre\":\"লোকসঙ্গীত\""));
    }
}
