//! Read access to the host media catalog.
//!
//! The notifier never owns library data. [`MediaCatalog`] is the seam a host
//! integration implements; [`InMemoryCatalog`] backs the standalone server
//! with items received over the webhook or seeded from a JSON file.

use async_trait::async_trait;
use media_notifier_common::{Error, ItemId, ItemKind, MediaItem, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

/// Kinds worth showing in a test notification.
pub const SAMPLE_KINDS: [ItemKind; 4] = [
    ItemKind::Movie,
    ItemKind::Episode,
    ItemKind::Audio,
    ItemKind::MusicAlbum,
];

/// Items an [`InMemoryCatalog`] holds before it starts evicting.
pub const DEFAULT_CATALOG_CAPACITY: usize = 1_000;

/// Source of library items for test notifications.
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Up to `limit` non-virtual items of the [`SAMPLE_KINDS`], newest first.
    async fn recent_items(&self, limit: usize) -> Result<Vec<MediaItem>>;
}

/// Whether an item may be picked for a test notification.
pub fn is_sampleable(item: &MediaItem) -> bool {
    !item.is_virtual && SAMPLE_KINDS.contains(&item.kind())
}

/// Catalog held entirely in memory, keyed by item id.
///
/// Past `capacity` items the oldest by `date_added` are evicted; undated
/// items go first.
#[derive(Debug)]
pub struct InMemoryCatalog {
    items: RwLock<HashMap<ItemId, MediaItem>>,
    capacity: usize,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CATALOG_CAPACITY)
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn from_items(items: Vec<MediaItem>) -> Self {
        let catalog = Self::new();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// Load a JSON array of items.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let items: Vec<MediaItem> = serde_json::from_str(&content).map_err(|e| {
            Error::invalid_input(format!("invalid item list {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), count = items.len(), "Loaded catalog items");
        Ok(Self::from_items(items))
    }

    /// Record an item, replacing any earlier copy with the same id.
    pub fn insert(&self, item: MediaItem) {
        let mut items = self.items.write();
        items.insert(item.id, item);

        while items.len() > self.capacity {
            let oldest = items
                .values()
                .min_by_key(|item| item.date_added)
                .map(|item| item.id);
            match oldest {
                Some(id) => {
                    items.remove(&id);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl MediaCatalog for InMemoryCatalog {
    async fn recent_items(&self, limit: usize) -> Result<Vec<MediaItem>> {
        let mut items: Vec<MediaItem> = self
            .items
            .read()
            .values()
            .filter(|item| is_sampleable(item))
            .cloned()
            .collect();

        // Items without a date sort last.
        items.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        items.truncate(limit);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use media_notifier_common::MediaDetails;
    use std::io::Write;

    fn movie(name: &str, day: u32) -> MediaItem {
        MediaItem::new(name, MediaDetails::Movie)
            .with_date_added(Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_recent_items_newest_first_and_limited() {
        let catalog = InMemoryCatalog::from_items(vec![
            movie("Old", 1),
            movie("Newest", 20),
            movie("Middle", 10),
        ]);

        let items = catalog.recent_items(2).await.unwrap();
        let names: Vec<_> = items.iter().map(|i| i.display_name()).collect();
        assert_eq!(names, vec!["Newest", "Middle"]);
    }

    #[tokio::test]
    async fn test_recent_items_excludes_virtual_and_unsupported() {
        let mut virtual_movie = movie("Announced", 5);
        virtual_movie.is_virtual = true;

        let catalog = InMemoryCatalog::from_items(vec![
            virtual_movie,
            MediaItem::new("Show", MediaDetails::Series),
            MediaItem::new("Photo", MediaDetails::Other),
            movie("Dune", 2),
        ]);

        let items = catalog.recent_items(50).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display_name(), "Dune");
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let catalog = InMemoryCatalog::new();
        let mut item = movie("Dune", 1);
        catalog.insert(item.clone());

        item.production_year = Some(2021);
        catalog.insert(item);
        catalog.insert(movie("Arrival", 2));

        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_evicts_oldest_past_capacity() {
        let catalog = InMemoryCatalog::with_capacity(2);
        catalog.insert(movie("Old", 1));
        catalog.insert(movie("Newest", 20));
        catalog.insert(movie("Middle", 10));

        assert_eq!(catalog.len(), 2);
        let items = catalog.recent_items(50).await.unwrap();
        let names: Vec<_> = items.iter().map(|i| i.display_name()).collect();
        assert_eq!(names, vec!["Newest", "Middle"]);
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"kind": "movie", "name": "Dune", "production_year": 2021}},
                {{"kind": "episode", "name": "Pilot", "series_name": "The Office", "season": 1, "episode": 1}}
            ]"#
        )
        .unwrap();

        let catalog = InMemoryCatalog::load_json(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_json_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = InMemoryCatalog::load_json(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
