//! Typed ID wrappers.
//!
//! Item identities come from the host library; the notifier only carries them
//! through to log lines and catalog lookups.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a library item (movie, episode, track, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a new random item ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ItemId> for Uuid {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_creation() {
        let id1 = ItemId::new();
        let id2 = ItemId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_item_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let item_id = ItemId::from(uuid);
        let uuid_back: Uuid = item_id.into();
        assert_eq!(uuid, uuid_back);
    }

    #[test]
    fn test_item_id_is_transparent_in_json() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&ItemId::from(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
