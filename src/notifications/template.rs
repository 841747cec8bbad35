//! Message templates: turn a format string plus item metadata into the
//! notification body.
//!
//! Each media kind recognizes its own placeholder set:
//!
//! - movies and series: `{title}`, `{year}`
//! - episodes: `{series}`, `{name}`, `{season}`, `{season:00}`, `{episode}`,
//!   `{episode:00}`
//! - albums and tracks: `{track}`, `{artist}`, `{album}`
//!
//! Unrecognized placeholders are left in the output untouched.

use media_notifier_common::{non_blank, MediaDetails, MediaItem, UNKNOWN_NAME};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::NotificationConfig;

pub const DEFAULT_TITLE: &str = "New Media Added";
pub const DEFAULT_MOVIE_FORMAT: &str = "{title} ({year})";
pub const DEFAULT_EPISODE_FORMAT: &str = "{series} - S{season:00}E{episode:00}: {name}";
pub const DEFAULT_MUSIC_FORMAT: &str = "{track} - {artist}";

const UNKNOWN_SERIES: &str = "Unknown Series";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";
const UNKNOWN_TRACK: &str = "Unknown Track";
const GENERIC_EPISODE: &str = "Episode";

/// Characters trimmed after a stripped series/artist prefix.
const SEPARATORS: &[char] = &[' ', '-', ':'];

/// The `S` label written in front of a season placeholder in a template.
static SEASON_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"S(\{season(?::00)?\})").expect("season label pattern is valid")
});

/// Title and body for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    pub title: String,
    pub body: String,
}

/// Placeholder values for one substitution pass.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    vars: HashMap<String, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a placeholder value. `key` is the name between the braces.
    pub fn with_var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Replace every recognized `{key}` in one left-to-right pass.
    ///
    /// Substituted values are not scanned again, so a value that itself
    /// looks like a placeholder is emitted literally.
    pub fn substitute(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let candidate = &rest[open + 1..];

            let replacement = candidate
                .find('}')
                .and_then(|close| self.get(&candidate[..close]).map(|v| (close, v)));

            match replacement {
                Some((close, value)) => {
                    result.push_str(value);
                    rest = &candidate[close + 1..];
                }
                None => {
                    result.push('{');
                    rest = candidate;
                }
            }
        }

        result.push_str(rest);
        result
    }
}

/// Build the title and body for an item.
///
/// Without a config only the bare item name is available.
pub fn resolve(item: &MediaItem, config: Option<&NotificationConfig>) -> ResolvedMessage {
    match config {
        Some(config) => ResolvedMessage {
            title: resolve_title(config),
            body: format_body(item, config),
        },
        None => ResolvedMessage {
            title: DEFAULT_TITLE.to_string(),
            body: item.display_name().to_string(),
        },
    }
}

/// The configured notification title, independent of the item.
pub fn resolve_title(config: &NotificationConfig) -> String {
    non_blank(Some(config.notification_title.as_str()))
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

/// Format the body with the template configured for the item's kind.
pub fn format_body(item: &MediaItem, config: &NotificationConfig) -> String {
    let name = non_blank(item.name.as_deref());

    match &item.details {
        MediaDetails::Movie | MediaDetails::Series => {
            format_movie(name, item.production_year, &config.movie_format)
        }
        MediaDetails::Episode {
            series_name,
            season,
            episode,
        } => format_episode(
            name,
            series_name.as_deref(),
            *season,
            *episode,
            &config.episode_format,
        ),
        MediaDetails::MusicAlbum { album_artists } => {
            format_album(name, first_named(album_artists), &config.music_format)
        }
        MediaDetails::Audio {
            artists,
            album_artists,
            album,
            album_entity_name,
        } => {
            let artist = first_named(album_artists).or_else(|| first_named(artists));
            let album = non_blank(album.as_deref()).or(non_blank(album_entity_name.as_deref()));
            format_track(name, artist, album, &config.music_format)
        }
        MediaDetails::Other => item.display_name().to_string(),
    }
}

fn format_movie(name: Option<&str>, year: Option<i32>, format: &str) -> String {
    let year = year.map_or_else(|| UNKNOWN_NAME.to_string(), |y| y.to_string());

    Placeholders::new()
        .with_var("title", name.unwrap_or(UNKNOWN_NAME))
        .with_var("year", year)
        .substitute(template_or_default(format, DEFAULT_MOVIE_FORMAT))
}

fn format_episode(
    name: Option<&str>,
    series: Option<&str>,
    season: Option<u32>,
    episode: Option<u32>,
    format: &str,
) -> String {
    let series = non_blank(series);
    let title = match name {
        Some(name) => strip_redundant_prefix(name, series, GENERIC_EPISODE),
        None => GENERIC_EPISODE.to_string(),
    };

    let vars = Placeholders::new()
        .with_var("series", series.unwrap_or(UNKNOWN_SERIES))
        .with_var("name", title);
    let format = template_or_default(format, DEFAULT_EPISODE_FORMAT);

    match (season, episode) {
        (Some(season), Some(episode)) => vars
            .with_var("season:00", format!("{:02}", season))
            .with_var("season", season.to_string())
            .with_var("episode:00", format!("{:02}", episode))
            .with_var("episode", episode.to_string())
            .substitute(format),
        (None, Some(episode)) => {
            // Drop the label in the template so item text is never rewritten
            let format = SEASON_LABEL.replace_all(format, "$1");
            vars.with_var("season:00", "")
                .with_var("season", "")
                .with_var("episode:00", format!("{:02}", episode))
                .with_var("episode", episode.to_string())
                .substitute(&format)
                .replace("S - ", "")
                .replace("S: ", "")
        }
        _ => vars
            .with_var("season:00", "")
            .with_var("season", "")
            .with_var("episode:00", "")
            .with_var("episode", "")
            .substitute(format)
            .replace("S - E: ", "")
            .replace("SE: ", ""),
    }
}

fn format_album(name: Option<&str>, artist: Option<&str>, format: &str) -> String {
    let album = match name {
        Some(name) => strip_redundant_prefix(name, artist, UNKNOWN_ALBUM),
        None => UNKNOWN_ALBUM.to_string(),
    };

    Placeholders::new()
        .with_var("artist", artist.unwrap_or(UNKNOWN_ARTIST))
        .with_var("album", album.clone())
        .with_var("track", album)
        .substitute(template_or_default(format, DEFAULT_MUSIC_FORMAT))
}

fn format_track(
    name: Option<&str>,
    artist: Option<&str>,
    album: Option<&str>,
    format: &str,
) -> String {
    let track = match name {
        Some(name) => strip_redundant_prefix(name, artist, UNKNOWN_TRACK),
        None => UNKNOWN_TRACK.to_string(),
    };

    Placeholders::new()
        .with_var("artist", artist.unwrap_or(UNKNOWN_ARTIST))
        .with_var("album", album.unwrap_or(UNKNOWN_ALBUM))
        .with_var("track", track)
        .substitute(template_or_default(format, DEFAULT_MUSIC_FORMAT))
}

fn template_or_default<'a>(format: &'a str, default: &'a str) -> &'a str {
    if format.trim().is_empty() {
        default
    } else {
        format
    }
}

fn first_named(names: &[String]) -> Option<&str> {
    names.iter().map(String::as_str).find(|n| !n.trim().is_empty())
}

/// Drop a leading copy of an already-shown field from a dependent one.
///
/// `"The Office - Pilot"` under series `"The Office"` becomes `"Pilot"`. A
/// value equal to the prefix (ignoring case), or nothing but the prefix and
/// separators, becomes `fallback`.
pub fn strip_redundant_prefix(value: &str, prefix: Option<&str>, fallback: &str) -> String {
    let value = value.trim();
    let Some(prefix) = prefix.map(str::trim).filter(|p| !p.is_empty()) else {
        return value.to_string();
    };

    if value.to_lowercase() == prefix.to_lowercase() {
        return fallback.to_string();
    }

    let head_matches = value
        .get(..prefix.len())
        .is_some_and(|head| head.to_lowercase() == prefix.to_lowercase());
    if !head_matches {
        return value.to_string();
    }

    match value[prefix.len()..].trim_start_matches(SEPARATORS) {
        "" => fallback.to_string(),
        stripped => stripped.to_string(),
    }
}
