//! Media item snapshots as reported by the host library.
//!
//! The host owns and mutates its items; the notifier only ever reads a
//! snapshot taken when the item-added event fired. Kind-specific metadata
//! lives in [`MediaDetails`] so formatting code can match on it exhaustively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ids::ItemId;
use crate::types::ItemKind;

/// Fallback shown wherever an item has no name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A read-only snapshot of one library item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(default)]
    pub id: ItemId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub production_year: Option<i32>,

    /// Placeholder entries for content that is known but not on disk.
    #[serde(default)]
    pub is_virtual: bool,

    /// Containers (series, seasons, album folders, collections).
    #[serde(default)]
    pub is_folder: bool,

    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,

    /// Local artwork file, uploaded as an attachment when thumbnails are on.
    #[serde(default)]
    pub primary_image: Option<PathBuf>,

    /// Publicly reachable artwork URL, used when no local file is known.
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(flatten)]
    pub details: MediaDetails,
}

/// Kind-specific metadata, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaDetails {
    Movie,
    Series,
    Episode {
        /// May already be embedded in the episode name.
        #[serde(default)]
        series_name: Option<String>,
        /// Parent (season) index.
        #[serde(default)]
        season: Option<u32>,
        #[serde(default)]
        episode: Option<u32>,
    },
    MusicAlbum {
        #[serde(default)]
        album_artists: Vec<String>,
    },
    Audio {
        #[serde(default)]
        artists: Vec<String>,
        #[serde(default)]
        album_artists: Vec<String>,
        /// Album field stored on the track itself.
        #[serde(default)]
        album: Option<String>,
        /// Name of the album entity the track belongs to.
        #[serde(default)]
        album_entity_name: Option<String>,
    },
    Other,
}

impl MediaDetails {
    /// The item kind this payload describes.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Movie => ItemKind::Movie,
            Self::Series => ItemKind::Series,
            Self::Episode { .. } => ItemKind::Episode,
            Self::MusicAlbum { .. } => ItemKind::MusicAlbum,
            Self::Audio { .. } => ItemKind::Audio,
            Self::Other => ItemKind::Other,
        }
    }
}

impl MediaItem {
    /// Create a non-virtual, non-folder item with a fresh ID.
    pub fn new(name: impl Into<String>, details: MediaDetails) -> Self {
        Self {
            id: ItemId::new(),
            name: Some(name.into()),
            production_year: None,
            is_virtual: false,
            is_folder: false,
            date_added: None,
            primary_image: None,
            image_url: None,
            details,
        }
    }

    /// Set the production year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.production_year = Some(year);
        self
    }

    /// Set the local artwork file.
    pub fn with_primary_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.primary_image = Some(path.into());
        self
    }

    /// Set the date the item was added to the library.
    pub fn with_date_added(mut self, date: DateTime<Utc>) -> Self {
        self.date_added = Some(date);
        self
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    /// The item name, or `"Unknown"` when the host has none.
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or(UNKNOWN_NAME)
    }
}

/// Treat empty and whitespace-only strings as missing.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
