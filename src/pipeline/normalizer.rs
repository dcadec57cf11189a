use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::AppConfig;
use crate::core::hash::fallback_event_id;
use crate::core::time::{display_time, parse_event_time};
use crate::core::types::{Disaster, DisasterType, LatLon, Severity, Status};
use crate::pipeline::location::clean_location_from_title;
use crate::sources::raw::{RawEvent, RawGeometry};

/// Outcome of matching a feed category label against the supported hazards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMatch {
    Known(DisasterType),
    Unrecognized,
}

impl CategoryMatch {
    pub fn disaster_type(self) -> Option<DisasterType> {
        match self {
            CategoryMatch::Known(kind) => Some(kind),
            CategoryMatch::Unrecognized => None,
        }
    }
}

const CATEGORY_TABLE: [(&str, DisasterType); 4] = [
    ("wildfires", DisasterType::Wildfire),
    ("severe storms", DisasterType::Storm),
    ("earthquakes", DisasterType::Earthquake),
    ("floods", DisasterType::Flood),
];

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub max_records: usize,
    pub drop_unlocated: bool,
    /// Date used when an event carries no usable timestamp.
    pub now: DateTime<Utc>,
}

impl NormalizeOptions {
    pub fn from_config(cfg: &AppConfig, now: DateTime<Utc>) -> Self {
        Self {
            max_records: cfg.max_records,
            drop_unlocated: cfg.drop_unlocated,
            now,
        }
    }
}

/// Exact, case-insensitive phrase match. No partial matching.
pub fn map_category_to_type(category_title: &str) -> CategoryMatch {
    let lowered = category_title.to_lowercase();
    CATEGORY_TABLE
        .iter()
        .find(|(phrase, _)| *phrase == lowered)
        .map(|(_, kind)| CategoryMatch::Known(*kind))
        .unwrap_or(CategoryMatch::Unrecognized)
}

/// First `[lon, lat]` pair found depth-first, returned as `{lat, lon}`.
pub fn extract_lat_lon(geometry: &RawGeometry) -> Option<LatLon> {
    find_pair(&geometry.coordinates)
}

fn find_pair(coords: &Value) -> Option<LatLon> {
    let items = coords.as_array()?;
    if items.len() >= 2 {
        if let (Some(lon), Some(lat)) = (items[0].as_f64(), items[1].as_f64()) {
            return Some(LatLon { lat, lon });
        }
    }
    items.iter().find_map(find_pair)
}

/// Fixed per-type lookup; the feed carries no magnitude we could score on.
pub fn assign_severity(kind: DisasterType) -> Severity {
    match kind {
        DisasterType::Earthquake => Severity::Critical,
        DisasterType::Wildfire => Severity::High,
        DisasterType::Storm => Severity::High,
        DisasterType::Flood => Severity::Medium,
    }
}

pub fn normalize_event(raw: &RawEvent, opts: &NormalizeOptions) -> Option<Disaster> {
    let label = raw.stable_id().unwrap_or_else(|| "<untitled>".to_string());

    let Some(category) = raw.primary_category() else {
        tracing::debug!("skip {}: no category", label);
        return None;
    };
    let Some(kind) = map_category_to_type(&category.title).disaster_type() else {
        tracing::debug!("skip {}: unsupported category {:?}", label, category.title);
        return None;
    };

    let geometry = raw.latest_geometry();
    let point = match geometry.and_then(extract_lat_lon) {
        Some(point) => point,
        None if opts.drop_unlocated => {
            tracing::debug!("skip {}: no coordinates", label);
            return None;
        }
        None => {
            tracing::warn!("{} has no coordinates; placing at (0, 0)", label);
            LatLon::ORIGIN
        }
    };
    if !point.is_finite() {
        tracing::debug!("skip {}: non-finite coordinates", label);
        return None;
    }

    let date = resolve_date(raw, geometry, opts.now);
    let title = raw.title.clone().unwrap_or_default();
    let id = raw
        .stable_id()
        .unwrap_or_else(|| fallback_event_id(&date.to_rfc3339(), point.lat, point.lon));

    Some(Disaster {
        id,
        disaster_type: kind,
        location: clean_location_from_title(&title, kind, point.lat, point.lon),
        coordinates: (point.lat, point.lon),
        severity: assign_severity(kind),
        status: Status::Active,
        affected_people: 0,
        last_update: display_time(&date),
        date,
        closed: raw.closed.as_deref().and_then(parse_event_time),
        description: title,
    })
}

/// Latest geometry date, then close, then open; the first that parses wins.
fn resolve_date(
    raw: &RawEvent,
    geometry: Option<&RawGeometry>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let candidates = [
        geometry.and_then(|g| g.date.as_deref()),
        raw.closed.as_deref(),
        raw.open.as_deref(),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(parse_event_time)
        .unwrap_or(now)
}

/// Normalize a fetched batch: drop unsupported or unlocatable events, newest
/// first, at most `max_records`.
pub fn normalize_events(events: &[RawEvent], opts: &NormalizeOptions) -> Vec<Disaster> {
    let mut out: Vec<Disaster> = events
        .iter()
        .filter_map(|ev| normalize_event(ev, opts))
        .collect();
    let kept = out.len();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(opts.max_records);
    tracing::info!(
        "normalized {} of {} events, keeping {}",
        kept,
        events.len(),
        out.len()
    );
    out
}
