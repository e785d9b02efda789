//! Core types for Atomitter

use chrono::{DateTime, Utc};

use crate::expand::expand_urls;

/// A single entry fetched from an RSS or Atom feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub guid: Option<String>,
    pub author: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub categories: Vec<String>,
}

impl FeedItem {
    /// Create an item with just a title and link
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Default::default()
        }
    }
}

/// A shortened URL and the original it redirects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntity {
    pub url: String,
    pub expanded_url: String,
}

impl UrlEntity {
    pub fn new(url: impl Into<String>, expanded_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            expanded_url: expanded_url.into(),
        }
    }
}

/// A message already published on the user's timeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelinePost {
    pub id: String,
    pub text: String,
    pub urls: Vec<UrlEntity>,
}

impl TimelinePost {
    pub fn new(id: impl Into<String>, text: impl Into<String>, urls: Vec<UrlEntity>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            urls,
        }
    }

    /// The post text with every shortened URL replaced by its expansion
    pub fn expanded_text(&self) -> String {
        expand_urls(&self.text, &self.urls)
    }
}
