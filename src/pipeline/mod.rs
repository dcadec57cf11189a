//! Fetch, normalize, summarize, report.

pub mod collector;
pub mod location;
pub mod normalizer;
pub mod reporter;
pub mod summary;
