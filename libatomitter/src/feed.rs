//! RSS and Atom feed retrieval

use std::time::Duration;

use feed_rs::model::Entry;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::FeedError;
use crate::types::FeedItem;

/// Build the HTTP client used for feed requests
pub fn http_client(config: &Config) -> Result<Client, FeedError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(format!("atomitter/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Download and parse the feed at `url`
#[instrument(skip(client))]
pub async fn fetch_feed(client: &Client, url: &str) -> Result<Vec<FeedItem>, FeedError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    let items = parse_feed(&body)?;
    debug!(count = items.len(), "Fetched feed items");
    Ok(items)
}

/// Parse an RSS, Atom or JSON feed document into items, in document order
///
/// Entries without an id keep an empty one, so their `guid` is `None`.
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedItem>, FeedError> {
    let feed = feed_rs::parser::Builder::new()
        .id_generator(|_, _, _| String::new())
        .build()
        .parse(body)?;
    Ok(feed.entries.iter().map(feed_item).collect())
}

fn feed_item(entry: &Entry) -> FeedItem {
    FeedItem {
        title: entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        link: entry_link(entry),
        description: entry.summary.as_ref().map(|s| s.content.clone()),
        content: entry.content.as_ref().and_then(|c| c.body.clone()),
        guid: Some(entry.id.clone()).filter(|id| !id.is_empty()),
        author: entry.authors.first().map(|a| a.name.clone()),
        published: entry.published,
        updated: entry.updated,
        categories: entry.categories.iter().map(|c| c.term.clone()).collect(),
    }
}

/// Pick the entry's permalink
///
/// Prefers an `alternate` (or rel-less) link, then any link, then an
/// http(s) entry id.
fn entry_link(entry: &Entry) -> String {
    for link in &entry.links {
        let href = link.href.trim();
        if href.is_empty() {
            continue;
        }
        let rel = link.rel.as_deref().unwrap_or("");
        if rel.is_empty() || rel.eq_ignore_ascii_case("alternate") {
            return href.to_string();
        }
    }
    if let Some(link) = entry.links.iter().find(|l| !l.href.trim().is_empty()) {
        return link.href.trim().to_string();
    }
    let id = entry.id.trim();
    if id.starts_with("http://") || id.starts_with("https://") {
        return id.to_string();
    }
    String::new()
}
