//! Notification tags per media kind.
//!
//! The relay renders known tag names as emoji, so the first tag of each set
//! doubles as the icon.

use media_notifier_common::ItemKind;

pub const MOVIE_TAGS: &str = "clapper,movie";
pub const SERIES_TAGS: &str = "tv,series";
pub const MUSIC_TAGS: &str = "musical_note,music";
pub const FALLBACK_TAGS: &str = "file_folder";

/// Map an item kind to its comma-joined tag list.
pub fn classify_tags(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Movie => MOVIE_TAGS,
        ItemKind::Episode | ItemKind::Series => SERIES_TAGS,
        ItemKind::MusicAlbum | ItemKind::Audio => MUSIC_TAGS,
        ItemKind::Other => FALLBACK_TAGS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_tags() {
        assert_eq!(classify_tags(ItemKind::Movie), "clapper,movie");
        assert_eq!(classify_tags(ItemKind::Episode), "tv,series");
        assert_eq!(classify_tags(ItemKind::Series), "tv,series");
        assert_eq!(classify_tags(ItemKind::MusicAlbum), "musical_note,music");
        assert_eq!(classify_tags(ItemKind::Audio), "musical_note,music");
        assert_eq!(classify_tags(ItemKind::Other), "file_folder");
    }
}
