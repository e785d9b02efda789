//! Platform abstraction and implementations
//!
//! The sync pipeline needs exactly two things from a social platform: the
//! user's recent posts, and a way to publish a new one. Authentication is
//! the implementation's business; callers never see credentials.
//!
//! # Examples
//!
//! ```no_run
//! use libatomitter::platforms::{Timeline, twitter::TwitterClient};
//! use libatomitter::config::Config;
//!
//! # async fn example() -> Result<(), libatomitter::error::PlatformError> {
//! let config = Config::default();
//! let client = TwitterClient::from_config(&config)?;
//!
//! let posts = client.fetch_recent_posts(&config.username).await?;
//! println!("{} has {} recent posts", config.username, posts.len());
//!
//! let post_id = client.submit_post("Hello from my feed").await?;
//! println!("Posted: {}", post_id);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::types::TimelinePost;

pub mod mock;
pub mod oauth;
pub mod twitter;

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// A user timeline that can be read and posted to
#[async_trait]
pub trait Timeline: Send + Sync {
    /// Fetch the user's most recent original posts
    ///
    /// Replies and reposts are excluded; each returned post carries the
    /// shortened URL pairs the platform reported for it.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Authentication` for rejected credentials and
    /// `PlatformError::Network` or `PlatformError::Api` when the request fails.
    async fn fetch_recent_posts(&self, username: &str) -> PlatformResult<Vec<TimelinePost>>;

    /// Publish a new post and return its platform-specific ID
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the post or is unreachable.
    async fn submit_post(&self, text: &str) -> PlatformResult<String>;

    /// Lowercase platform identifier (e.g., "twitter")
    fn name(&self) -> &str;
}
