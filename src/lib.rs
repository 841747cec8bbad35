//! media-notifier - push notifications for new library media
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod library;
pub mod notifications;
pub mod server;
