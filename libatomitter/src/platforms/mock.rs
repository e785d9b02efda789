//! Mock timeline implementation for testing
//!
//! Serves a canned timeline and records everything submitted to it, with
//! switches for simulating failures. Available in all builds so integration
//! tests can drive the full sync pipeline without network access.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::PlatformError;
use crate::platforms::{PlatformResult, Timeline};
use crate::types::TimelinePost;

/// Configuration for mock timeline behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Platform name (e.g., "mock-twitter")
    pub name: String,

    /// Posts returned by `fetch_recent_posts`
    pub timeline: Vec<TimelinePost>,

    /// Error to return when fetching the timeline
    pub timeline_error: Option<PlatformError>,

    /// Number of submissions that succeed before `post_error` is returned
    pub fail_after: Option<usize>,

    /// Error to return once `fail_after` submissions have succeeded
    pub post_error: PlatformError,

    /// Usernames the timeline was requested for
    pub requested_usernames: Arc<Mutex<Vec<String>>>,

    /// Number of times submit_post has been called
    pub post_call_count: Arc<Mutex<usize>>,

    /// Posts that have been made (for verification)
    pub posted_content: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            timeline: Vec::new(),
            timeline_error: None,
            fail_after: None,
            post_error: PlatformError::Posting("Mock posting failed".to_string()),
            requested_usernames: Arc::new(Mutex::new(Vec::new())),
            post_call_count: Arc::new(Mutex::new(0)),
            posted_content: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock timeline for testing
pub struct MockTimeline {
    config: MockConfig,
}

impl MockTimeline {
    /// Create a new mock timeline with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Create a mock timeline that already holds `posts`
    pub fn with_posts(posts: Vec<TimelinePost>) -> Self {
        Self::new(MockConfig {
            timeline: posts,
            ..Default::default()
        })
    }

    /// Create a mock timeline whose timeline request fails
    pub fn timeline_failure(error: PlatformError) -> Self {
        Self::new(MockConfig {
            timeline_error: Some(error),
            ..Default::default()
        })
    }

    /// Create a mock timeline that rejects the submission after `successes` posts
    pub fn post_failure_after(successes: usize, error: &str) -> Self {
        Self::new(MockConfig {
            fail_after: Some(successes),
            post_error: PlatformError::Posting(error.to_string()),
            ..Default::default()
        })
    }

    /// Usernames passed to `fetch_recent_posts`
    pub fn requested_usernames(&self) -> Vec<String> {
        self.config
            .requested_usernames
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }

    /// Get the number of times submit_post was called
    pub fn post_call_count(&self) -> usize {
        self.config
            .post_call_count
            .lock()
            .map(|count| *count)
            .unwrap_or_default()
    }

    /// Get all content that was posted
    pub fn posted_content(&self) -> Vec<String> {
        self.config
            .posted_content
            .lock()
            .map(|posted| posted.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Timeline for MockTimeline {
    async fn fetch_recent_posts(&self, username: &str) -> PlatformResult<Vec<TimelinePost>> {
        if let Ok(mut names) = self.config.requested_usernames.lock() {
            names.push(username.to_string());
        }

        match &self.config.timeline_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.config.timeline.clone()),
        }
    }

    async fn submit_post(&self, text: &str) -> PlatformResult<String> {
        let call = {
            let mut count = self
                .config
                .post_call_count
                .lock()
                .map_err(|_| PlatformError::Posting("Mock state poisoned".to_string()))?;
            *count += 1;
            *count
        };

        if let Some(limit) = self.config.fail_after {
            if call > limit {
                return Err(self.config.post_error.clone());
            }
        }

        let mut posted = self
            .config
            .posted_content
            .lock()
            .map_err(|_| PlatformError::Posting("Mock state poisoned".to_string()))?;
        posted.push(text.to_string());

        Ok(format!("{}:mock-{}", self.config.name, posted.len()))
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}
