use crate::core::error::WatchError;
use crate::core::types::Disaster;
use crate::pipeline::normalizer::{normalize_events, NormalizeOptions};
use crate::sources::EventFeedClient;

/// One fetch followed by normalization. Errors are returned as-is.
pub async fn try_fetch_disasters<F: EventFeedClient>(
    feed: &F,
    opts: &NormalizeOptions,
) -> Result<Vec<Disaster>, WatchError> {
    let events = feed.fetch_open_events().await?;
    Ok(normalize_events(&events, opts))
}

/// Fetch and normalize behind a single failure boundary: any error is logged
/// and yields an empty list. No retry and no partial results.
pub async fn fetch_disasters<F: EventFeedClient>(feed: &F, opts: &NormalizeOptions) -> Vec<Disaster> {
    match try_fetch_disasters(feed, opts).await {
        Ok(disasters) => disasters,
        Err(err) => {
            tracing::error!("error fetching events from {}: {}", feed.source_name(), err);
            Vec::new()
        }
    }
}
