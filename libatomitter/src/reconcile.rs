//! Matching feed items against the existing timeline
//!
//! There is no stored mapping from feed items to published posts. An item
//! counts as already posted when its rendered text is byte-for-byte equal to
//! the expanded text of some post on the timeline, so the template output is
//! the deduplication key. Changing the template therefore makes every item
//! look new again.

use tracing::debug;

use crate::template::Template;
use crate::types::{FeedItem, TimelinePost};

/// Return the feed items that do not appear on the timeline yet
///
/// Whenever a post matches an item's rendered text, every remaining
/// candidate sharing that item's link is dropped. Survivors keep their feed
/// order; nothing is added or duplicated.
pub fn reconcile(items: &[FeedItem], posts: &[TimelinePost], template: &Template) -> Vec<FeedItem> {
    let rendered: Vec<String> = items.iter().map(|item| template.render(item)).collect();
    let mut candidates: Vec<FeedItem> = items.to_vec();

    for post in posts {
        let post_text = post.expanded_text();

        for (item, item_text) in items.iter().zip(&rendered) {
            if *item_text == post_text {
                debug!(post_id = %post.id, link = %item.link, "Feed item already posted");
                candidates.retain(|candidate| candidate.link != item.link);
            }
        }
    }

    candidates
}
