//! Item kind enumeration.
//!
//! Serialized in lowercase to match the host library's item type names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of library item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A single movie.
    Movie,
    /// A TV series (show).
    Series,
    /// A single episode within a season.
    Episode,
    /// A music album.
    MusicAlbum,
    /// An audio track.
    Audio,
    /// Anything else the host reports (books, photos, collections...).
    Other,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
            Self::Episode => write!(f, "episode"),
            Self::MusicAlbum => write!(f, "musicalbum"),
            Self::Audio => write!(f, "audio"),
            Self::Other => write!(f, "other"),
        }
    }
}
