//! Sequential posting of feed items
//!
//! Items are submitted one at a time in feed order. The first failure ends
//! the run: later items are not attempted and earlier ones stay posted.

use tracing::info;

use crate::error::PlatformError;
use crate::platforms::Timeline;
use crate::template::Template;
use crate::types::FeedItem;

/// Render and submit every item, returning how many were posted
///
/// # Errors
///
/// Returns the platform error of the first submission that fails.
pub async fn post_all(
    timeline: &dyn Timeline,
    items: &[FeedItem],
    template: &Template,
) -> Result<usize, PlatformError> {
    for (posted, item) in items.iter().enumerate() {
        let text = template.render(item);
        info!(platform = timeline.name(), "Posting: {}", text);

        let post_id = timeline.submit_post(&text).await?;
        info!(platform = timeline.name(), post_id = %post_id, posted = posted + 1, "Posted");
    }

    Ok(items.len())
}
