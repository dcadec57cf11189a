use crate::core::types::{DashboardStats, Disaster, Severity, Status};

impl DashboardStats {
    pub fn from_disasters(disasters: &[Disaster]) -> Self {
        let mut stats = DashboardStats::default();
        for d in disasters {
            if d.status == Status::Active {
                stats.active_disasters += 1;
            }
            stats.people_affected = stats.people_affected.saturating_add(d.affected_people);
            *stats.by_type.entry(d.disaster_type).or_insert(0) += 1;
            *stats.by_severity.entry(d.severity).or_insert(0) += 1;
        }
        stats
    }
}

/// Map-marker colour for a severity level.
pub fn marker_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "green",
        Severity::Medium => "yellow",
        Severity::High => "orange",
        Severity::Critical => "red",
    }
}
