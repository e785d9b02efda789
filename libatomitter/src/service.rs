//! Feed-to-timeline sync pipeline
//!
//! One run loads nothing from disk itself: it takes a resolved [`Config`],
//! compiles the post template, fetches the feed and the user's recent
//! posts, works out which feed items are missing from the timeline and
//! posts them in feed order.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AtomitterError, Result};
use crate::feed;
use crate::platforms::{twitter::TwitterClient, Timeline};
use crate::poster::post_all;
use crate::reconcile::reconcile;
use crate::template::Template;
use crate::types::FeedItem;

/// Outcome of a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Items found in the feed
    pub feed_items: usize,
    /// Recent posts compared against
    pub timeline_posts: usize,
    /// Rendered text of every item missing from the timeline, in feed order
    pub pending: Vec<String>,
    /// Items actually submitted (always 0 for a dry run)
    pub posted: usize,
    pub dry_run: bool,
}

/// Orchestrates a single feed-to-timeline sync
pub struct SyncService {
    config: Config,
    template: Template,
    timeline: Box<dyn Timeline>,
    http: Client,
}

impl SyncService {
    /// Create a service that posts to Twitter
    ///
    /// The template is compiled first so a bad format string fails before
    /// any network I/O.
    pub fn from_config(config: Config) -> Result<Self> {
        let template = Template::compile(&config.format)?;
        let timeline = TwitterClient::from_config(&config).map_err(AtomitterError::TimelineFetch)?;
        Self::build(config, template, Box::new(timeline))
    }

    /// Create a service around an existing timeline implementation
    pub fn with_timeline(config: Config, timeline: Box<dyn Timeline>) -> Result<Self> {
        let template = Template::compile(&config.format)?;
        Self::build(config, template, timeline)
    }

    fn build(config: Config, template: Template, timeline: Box<dyn Timeline>) -> Result<Self> {
        let http = feed::http_client(&config)?;
        Ok(Self {
            config,
            template,
            timeline,
            http,
        })
    }

    /// Fetch the feed and timeline and return the items not yet posted
    ///
    /// Also returns the number of feed items and timeline posts seen.
    pub async fn pending(&self) -> Result<(Vec<FeedItem>, usize, usize)> {
        let items = feed::fetch_feed(&self.http, &self.config.feed_url).await?;
        let posts = self
            .timeline
            .fetch_recent_posts(&self.config.username)
            .await
            .map_err(AtomitterError::TimelineFetch)?;

        let untweeted = reconcile(&items, &posts, &self.template);
        debug!(
            feed_items = items.len(),
            timeline_posts = posts.len(),
            pending = untweeted.len(),
            "Reconciled feed against timeline"
        );

        Ok((untweeted, items.len(), posts.len()))
    }

    /// Run the full sync
    ///
    /// With `dry_run` set, nothing is submitted; the report lists what would
    /// have been posted.
    ///
    /// # Errors
    ///
    /// Any failure aborts the run. Items submitted before a failing one stay
    /// posted.
    pub async fn run(&self, dry_run: bool) -> Result<SyncReport> {
        let (untweeted, feed_items, timeline_posts) = self.pending().await?;
        let pending: Vec<String> = untweeted.iter().map(|i| self.template.render(i)).collect();

        let posted = if dry_run {
            for text in &pending {
                info!("Would post: {}", text);
            }
            0
        } else {
            post_all(self.timeline.as_ref(), &untweeted, &self.template)
                .await
                .map_err(AtomitterError::PostSubmission)?
        };

        Ok(SyncReport {
            feed_items,
            timeline_posts,
            pending,
            posted,
            dry_run,
        })
    }
}
