use std::path::{Path, PathBuf};

use crate::core::error::WatchError;
use crate::sources::raw::{FeedDocument, RawEvent};
use crate::sources::EventFeedClient;

/// A feed document saved to disk, replayed in place of the live endpoint.
pub struct FixtureFeed {
    path: PathBuf,
}

impl FixtureFeed {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl EventFeedClient for FixtureFeed {
    fn source_name(&self) -> String {
        format!("fixture:{}", self.path.display())
    }

    async fn fetch_open_events(&self) -> Result<Vec<RawEvent>, WatchError> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        let doc: FeedDocument = serde_json::from_str(&data)?;
        Ok(doc.events)
    }
}
