//! Wire shapes of the hazard-event feed. Deserialization is lenient: unknown
//! fields are ignored, missing and `null` fields take their defaults, and an
//! event that still fails to parse is dropped on its own.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedDocument {
    #[serde(default, deserialize_with = "lenient_events")]
    pub events: Vec<RawEvent>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_events<'de, D>(deserializer: D) -> Result<Vec<RawEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Value> = null_as_default(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawEvent>(value) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::debug!("skip malformed event: {}", err);
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    /// String in EONET, but numbers are tolerated.
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<RawCategory>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub geometries: Vec<RawGeometry>,
    /// Legacy singular field; EONET v3 ships an array here.
    #[serde(default)]
    pub geometry: Option<GeometryField>,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub closed: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeometry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "type")]
    pub geometry_type: Option<String>,
    /// `[lon, lat]` or nested arrays of them.
    #[serde(default)]
    pub coordinates: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GeometryField {
    Many(Vec<RawGeometry>),
    One(RawGeometry),
}

impl RawEvent {
    /// Stable identifier: the feed id, else the title.
    pub fn stable_id(&self) -> Option<String> {
        match &self.id {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
        self.title.clone().filter(|t| !t.is_empty())
    }

    pub fn primary_category(&self) -> Option<&RawCategory> {
        self.categories.first()
    }

    /// Latest observation: last of `geometries`, else the legacy `geometry` field.
    pub fn latest_geometry(&self) -> Option<&RawGeometry> {
        if let Some(last) = self.geometries.last() {
            return Some(last);
        }
        match self.geometry.as_ref()? {
            GeometryField::Many(list) => list.last(),
            GeometryField::One(single) => Some(single),
        }
    }
}
