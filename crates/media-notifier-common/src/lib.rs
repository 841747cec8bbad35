//! Media-Notifier-Common: the host library's view of media items.
//!
//! This crate provides the read-only data model the notifier consumes:
//!
//! - **Typed IDs**: a UUID wrapper identifying library items
//! - **Item kinds**: the closed set of media kinds the host reports
//! - **Media items**: snapshots of item metadata with a per-kind payload
//! - **Error Handling**: common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use media_notifier_common::{ItemKind, MediaDetails, MediaItem};
//!
//! let item = MediaItem::new(
//!     "Pilot",
//!     MediaDetails::Episode {
//!         series_name: Some("The Office".to_string()),
//!         season: Some(1),
//!         episode: Some(1),
//!     },
//! );
//!
//! assert_eq!(item.kind(), ItemKind::Episode);
//! assert_eq!(item.display_name(), "Pilot");
//! ```

pub mod error;
pub mod ids;
pub mod media;
pub mod types;

pub use error::{Error, Result};
pub use ids::ItemId;
pub use media::{non_blank, MediaDetails, MediaItem, UNKNOWN_NAME};
pub use types::ItemKind;
