//! Discogs API response types
//!
//! These types match what the Discogs API returns.
//! DO NOT add fields that aren't in the API response.
//!
//! API Reference: https://www.discogs.com/developers
//!
//! Wire keys are underscore-separated; bodies using camelCase keys are
//! normalized by the `decode` module before they reach these definitions.
//! The only per-field renames are the `type` / `type_` keys that collide
//! with the Rust keyword.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An artist credit on a release, search hit, or collection item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    /// Discogs artist ID
    pub id: i64,
    /// Artist name
    pub name: String,
    /// API URL for the artist
    pub resource_url: Option<String>,
    /// Credit role (e.g. "Producer") on extra-artist lists
    pub role: Option<String>,
    /// Artist name variation used on this release
    pub anv: Option<String>,
    /// Join phrase to the next credit (e.g. " & ", " feat. ")
    pub join: Option<String>,
    /// Track positions this credit applies to
    pub tracks: Option<String>,
}

/// A record label credit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    /// Discogs label ID
    pub id: i64,
    /// Label name
    pub name: String,
    /// API URL for the label
    pub resource_url: Option<String>,
    /// Entity type code
    pub entity_type: Option<String>,
    /// Catalog number assigned by this label
    pub catno: Option<String>,
}

/// One entry of a release tracklist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    /// Position on the release (e.g. "A1", "3")
    pub position: String,
    /// Track title
    pub title: String,
    /// Duration as printed (e.g. "4:20"), often missing
    pub duration: Option<String>,
    /// Entry kind ("track" or "heading"); the wire key is the literal
    /// `type_`, Discogs's own dodge around a reserved word
    #[serde(rename = "type_")]
    pub kind: String,
}

/// Image role within a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Primary,
    Secondary,
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Primary => "primary",
            ImageKind::Secondary => "secondary",
        }
    }
}

/// A cover image descriptor
///
/// Hashable by field values: used as the key of the image-download map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Image {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Primary or secondary image
    #[serde(rename = "type")]
    pub kind: ImageKind,
    /// API URL for the image
    pub resource_url: Option<String>,
    /// Full-size source URL
    pub uri: Option<String>,
    /// 150px thumbnail URL
    pub uri150: Option<String>,
}

/// One hit from a `/database/search` query
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MasterSearchResult {
    /// Discogs ID of the hit
    pub id: i64,
    /// ID of the master release this hit belongs to
    pub master_id: i64,
    /// API URL for the master release
    pub master_url: String,
    /// API URL for the hit itself
    pub resource_url: Option<String>,
    /// Record type of the hit ("master", "release", ...)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub barcode: Option<Vec<String>>,
    /// Catalog number
    pub catno: Option<String>,
    pub genre: Option<Vec<String>>,
    pub style: Option<Vec<String>>,
    pub label: Option<Vec<String>>,
    pub country: Option<String>,
    /// Full-size cover image URL
    pub cover_image: Option<String>,
    /// Cover thumbnail URL
    pub thumb: Option<String>,
    pub title: Option<String>,
    pub format: Option<Vec<String>>,
    /// Release year as printed (a string on this endpoint)
    pub year: Option<String>,
}

/// A full master release record from `/masters/{id}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MasterRelease {
    /// Discogs master ID
    pub id: Option<i64>,
    /// Site URL for the master
    pub uri: Option<String>,
    /// API URL of the versions list
    pub versions_url: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    /// First release year; 0 means unknown
    pub year: Option<i64>,
    /// Editorial quality flag (e.g. "Correct")
    pub data_quality: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub tracklist: Vec<Track>,
}

/// A folder within a user's collection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Folder {
    /// Discogs folder ID (0 is the built-in "All" folder)
    pub id: i64,
    pub name: String,
    /// Number of items in the folder
    pub count: i64,
    /// API URL for the folder
    pub resource_url: String,
}

/// One collection item from a folder listing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FolderItem {
    /// Discogs release ID
    pub id: i64,
    /// Instance of this release within the collection
    pub instance_id: i64,
    /// Folder the instance lives in
    pub folder_id: i64,
    /// User rating, 0-5
    pub rating: u8,
    pub basic_information: BasicInformation,
}

/// The release summary nested inside a collection item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicInformation {
    /// Discogs release ID
    pub id: i64,
    pub title: String,
    pub year: i64,
    /// API URL for the release
    pub resource_url: String,
    pub thumb_url: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
}

/// Physical format of a collection item (e.g. 2x Vinyl LP)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Format {
    /// Quantity as printed (a string on this endpoint)
    pub qty: String,
    /// Format name (e.g. "Vinyl", "CD")
    pub name: String,
    /// Format descriptors (e.g. "LP", "Reissue")
    pub description: Option<Vec<String>>,
}

/// A user-defined note field on a collection item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Note {
    pub field_id: i64,
    pub value: String,
}

/// Pagination metadata attached to list responses
///
/// Only the first page is ever consumed; the metadata is decoded so the
/// envelope shape stays honest, not to drive traversal.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pagination {
    /// Total page count
    pub pages: i64,
    /// Items per page
    pub per_page: i64,
    /// Total item count
    pub items: i64,
    /// Current page number (1-based)
    pub page: i64,
    /// Navigation URLs, absent on single-page responses
    pub urls: Option<PageUrls>,
}

/// Navigation URLs within [`Pagination`]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageUrls {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

/// Envelope of `/database/search`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub results: Vec<MasterSearchResult>,
    pub pagination: Pagination,
}

/// Envelope of `/users/{username}/collection/folders`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FolderResponse {
    #[serde(default)]
    pub folders: Vec<Folder>,
}

/// Envelope of `/users/{username}/collection/folders/{id}/releases`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FolderItemsResponse {
    #[serde(default)]
    pub releases: Vec<FolderItem>,
    pub pagination: Option<Pagination>,
}

// ============================================================================
// Human-readable summaries
// ============================================================================

impl fmt::Display for MasterSearchResult {
    /// One-line summary: `<title> {<year>} (<catno>)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {{{}}} ({})",
            self.title.as_deref().unwrap_or(""),
            self.year.as_deref().unwrap_or("----"),
            self.catno.as_deref().unwrap_or("unknown")
        )
    }
}

impl fmt::Display for MasterRelease {
    /// Multi-line summary: `<artist> - <title> (<year>)`, one line per track
    /// `<position> <title> (<duration>)`, then genres and styles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(title), Some(artist)) = (&self.title, self.artists.first()) {
            let year = match self.year {
                Some(y) if y != 0 => y.to_string(),
                _ => "----".to_string(),
            };
            writeln!(f, "{} - {} ({})", artist.name, title, year)?;
        }
        for track in &self.tracklist {
            writeln!(
                f,
                "{} {} ({})",
                track.position,
                track.title,
                track.duration.as_deref().unwrap_or("-:--")
            )?;
        }
        if !self.genres.is_empty() {
            writeln!(f, "{}", self.genres.join(", "))?;
        }
        if !self.styles.is_empty() {
            writeln!(f, "{}", self.styles.join(", "))?;
        }
        Ok(())
    }
}

// ============================================================================
// CONTRACT TESTS
// These verify our types match what the real API returns.
// If these fail, the API has changed and we need to update our types.
// ============================================================================
