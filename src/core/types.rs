use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DisasterType {
    Earthquake,
    Flood,
    Wildfire,
    Storm,
}

impl DisasterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Earthquake => "earthquake",
            DisasterType::Flood => "flood",
            DisasterType::Wildfire => "wildfire",
            DisasterType::Storm => "storm",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Monitoring,
    Resolved,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Monitoring => "monitoring",
            Status::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Placeholder for events whose geometry carries no coordinate pair.
    /// Indistinguishable from a real report at the equator/prime meridian.
    pub const ORIGIN: LatLon = LatLon { lat: 0.0, lon: 0.0 };

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// A normalized hazard event, ready for map markers and list cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Disaster {
    pub id: String,
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    pub location: String,
    /// `[latitude, longitude]`
    pub coordinates: (f64, f64),
    pub severity: Severity,
    pub status: Status,
    pub affected_people: u64,
    pub last_update: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub closed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

impl Disaster {
    pub fn lat(&self) -> f64 {
        self.coordinates.0
    }

    pub fn lon(&self) -> f64 {
        self.coordinates.1
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_disasters: usize,
    pub people_affected: u64,
    pub by_type: BTreeMap<DisasterType, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Markdown,
    Csv,
    Geojson,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub version: String,
    pub git_hash: String,
    pub source: String,
    pub config_hash: String,
    pub fetched_at: DateTime<Utc>,
    pub record_count: usize,
    pub output_file: String,
    pub output_hash: String,
    pub stats: DashboardStats,
}
