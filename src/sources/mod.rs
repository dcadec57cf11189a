use std::future::Future;

use crate::core::error::WatchError;

pub mod eonet;
pub mod fixture;
pub mod raw;

pub use raw::RawEvent;

/// Where raw hazard events come from. Normalization only ever sees the
/// returned batch, so the transport can be swapped or mocked freely.
pub trait EventFeedClient {
    /// Human-readable origin recorded in run manifests.
    fn source_name(&self) -> String;

    fn fetch_open_events(&self) -> impl Future<Output = Result<Vec<RawEvent>, WatchError>> + Send;
}
