//! Atomitter - post new feed items to a social timeline
//!
//! This library fetches an RSS or Atom feed, works out which items are not
//! on the user's timeline yet by comparing rendered post text, and posts the
//! missing ones.

pub mod config;
pub mod error;
pub mod expand;
pub mod feed;
pub mod logging;
pub mod platforms;
pub mod poster;
pub mod reconcile;
pub mod service;
pub mod template;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AtomitterError, Result};
pub use service::{SyncReport, SyncService};
pub use template::Template;
pub use types::{FeedItem, TimelinePost, UrlEntity};
