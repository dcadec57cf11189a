use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::core::types::{DashboardStats, Disaster, Manifest, OutputFormat};
use crate::pipeline::summary::marker_color;

pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

/// Writes disasters in feed order (newest first).
pub fn write_disasters(disasters: &[Disaster], format: OutputFormat, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = match format {
        OutputFormat::Json => serde_json::to_string_pretty(disasters)?,
        OutputFormat::Jsonl => render_jsonl(disasters)?,
        OutputFormat::Markdown => render_markdown(disasters),
        OutputFormat::Csv => render_csv(disasters),
        OutputFormat::Geojson => serde_json::to_string_pretty(&render_geojson(disasters))?,
    };
    fs::write(path, body)?;
    Ok(())
}

fn render_jsonl(disasters: &[Disaster]) -> Result<String> {
    let mut out = String::new();
    for d in disasters {
        out.push_str(&serde_json::to_string(d)?);
        out.push('\n');
    }
    Ok(out)
}

pub fn render_markdown(disasters: &[Disaster]) -> String {
    let stats = DashboardStats::from_disasters(disasters);
    let mut out = String::new();
    out.push_str("# Disaster Watch\n\n");
    out.push_str(&format!("- Active disasters: {}\n", stats.active_disasters));
    out.push_str(&format!("- People affected: {}\n", stats.people_affected));
    for (kind, count) in &stats.by_type {
        out.push_str(&format!("- {}: {}\n", kind.as_str(), count));
    }
    out.push('\n');

    if disasters.is_empty() {
        out.push_str("No active disasters.\n");
        return out;
    }
    for d in disasters {
        out.push_str(&format!(
            "## {} — {}\n",
            d.disaster_type.as_str().to_uppercase(),
            d.location
        ));
        out.push_str(&format!("- Severity: {}\n", d.severity.as_str()));
        out.push_str(&format!("- Status: {}\n", d.status.as_str()));
        out.push_str(&format!("- Coordinates: {:.4}, {:.4}\n", d.lat(), d.lon()));
        out.push_str(&format!("- Last update: {}\n", d.last_update));
        if !d.description.is_empty() {
            out.push_str(&format!("- Description: {}\n", d.description));
        }
        out.push('\n');
    }
    out
}

pub fn render_csv(disasters: &[Disaster]) -> String {
    let mut out = String::new();
    out.push_str("id,type,location,latitude,longitude,severity,status,date\n");
    for d in disasters {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            csv_field(&d.id),
            d.disaster_type.as_str(),
            csv_field(&d.location),
            d.lat(),
            d.lon(),
            d.severity.as_str(),
            d.status.as_str(),
            d.date.to_rfc3339()
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Point features for the map view. GeoJSON positions are `[lon, lat]`.
pub fn render_geojson(disasters: &[Disaster]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = disasters
        .iter()
        .map(|d| {
            serde_json::json!({
                "type": "Feature",
                "id": d.id,
                "geometry": {
                    "type": "Point",
                    "coordinates": [d.lon(), d.lat()],
                },
                "properties": {
                    "type": d.disaster_type,
                    "location": d.location,
                    "severity": d.severity,
                    "status": d.status,
                    "date": d.date,
                    "lastUpdate": d.last_update,
                    "markerColor": marker_color(d.severity),
                    "description": d.description,
                }
            })
        })
        .collect();
    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DisasterType, Severity, Status};
    use chrono::{TimeZone, Utc};

    fn sample() -> Disaster {
        let date = Utc.with_ymd_and_hms(2024, 6, 3, 6, 0, 0).unwrap();
        Disaster {
            id: "EONET_1".into(),
            disaster_type: DisasterType::Wildfire,
            location: "Point Fire, California".into(),
            coordinates: (39.0, -120.0),
            severity: Severity::High,
            status: Status::Active,
            affected_people: 0,
            last_update: "2024-06-03 06:00:00 UTC".into(),
            date,
            closed: None,
            description: "Wildfires - Point Fire, California".into(),
        }
    }

    #[test]
    fn csv_quotes_locations_with_commas() {
        let csv = render_csv(&[sample()]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,type,location,latitude,longitude,severity,status,date")
        );
        assert_eq!(
            lines.next(),
            Some("EONET_1,wildfire,\"Point Fire, California\",39,-120,high,active,2024-06-03T06:00:00+00:00")
        );
    }

    #[test]
    fn geojson_uses_lon_lat_order() {
        let geo = render_geojson(&[sample()]);
        let feature = &geo["features"][0];
        assert_eq!(feature["geometry"]["coordinates"][0], -120.0);
        assert_eq!(feature["geometry"]["coordinates"][1], 39.0);
        assert_eq!(feature["properties"]["markerColor"], "orange");
        assert_eq!(feature["properties"]["type"], "wildfire");
    }

    #[test]
    fn markdown_has_stats_and_empty_state() {
        let md = render_markdown(&[sample()]);
        assert!(md.contains("- Active disasters: 1"));
        assert!(md.contains("## WILDFIRE — Point Fire, California"));

        let empty = render_markdown(&[]);
        assert!(empty.contains("No active disasters."));
    }

    #[test]
    fn json_record_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "wildfire");
        assert_eq!(value["coordinates"], serde_json::json!([39.0, -120.0]));
        assert_eq!(value["lastUpdate"], "2024-06-03 06:00:00 UTC");
        assert_eq!(value["affectedPeople"], 0);
        assert_eq!(value["severity"], "high");
    }
}
