use std::time::Duration;

use reqwest::Client;

use crate::config::AppConfig;
use crate::core::error::WatchError;
use crate::sources::raw::{FeedDocument, RawEvent};
use crate::sources::EventFeedClient;

/// NASA EONET events endpoint, queried for open events only.
pub struct EonetClient {
    client: Client,
    url: String,
    limit: Option<u32>,
    days: Option<u32>,
}

impl EonetClient {
    pub fn new(config: &AppConfig) -> Result<Self, WatchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(4))
            .build()
            .map_err(WatchError::from)?;

        Ok(Self {
            client,
            url: config.feed_url.clone(),
            limit: config.query_limit,
            days: config.query_days,
        })
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("status", "open".to_string())];
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(days) = self.days {
            params.push(("days", days.to_string()));
        }
        params
    }
}

impl EventFeedClient for EonetClient {
    fn source_name(&self) -> String {
        self.url.clone()
    }

    async fn fetch_open_events(&self) -> Result<Vec<RawEvent>, WatchError> {
        tracing::debug!("fetching open events from {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .query(&self.query())
            .send()
            .await
            .map_err(WatchError::from)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(WatchError::Http(format!("{} returned {}", self.url, status)));
        }
        let body = resp.text().await.map_err(WatchError::from)?;
        let doc: FeedDocument = serde_json::from_str(&body)?;
        tracing::debug!("feed returned {} events", doc.events.len());
        Ok(doc.events)
    }
}
