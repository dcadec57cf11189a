//! Best-effort place names from free-text event titles.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::core::types::DisasterType;

const UNKNOWN_LOCATION: &str = "Unknown";

struct Patterns {
    whole_word_in: Regex,
    wildfire: Regex,
    storm: Regex,
    earthquake: Regex,
    flood: Regex,
    generic: Regex,
    numbers: Regex,
    punctuation: Regex,
    whitespace: Regex,
    trailing_in: Regex,
    india: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        whole_word_in: compile(r"(?i)\bin\b"),
        wildfire: compile(r"(?i)\b(wildfire|wildfires)\b"),
        storm: compile(r"(?i)\b(severe\s*storm|severe\s*storms|storm|storms)\b"),
        earthquake: compile(r"(?i)\b(earthquake|earthquakes)\b"),
        flood: compile(r"(?i)\b(flood|floods|flooding)\b"),
        generic: compile(r"(?i)\b(event|alert|hazard)\b"),
        numbers: compile(r"\b[0-9]+\b"),
        punctuation: compile(r"\s*[-–—_,][-–—_,\s]*"),
        whitespace: compile(r"\s+"),
        trailing_in: compile(r"(?i)\bin\s*$"),
        india: compile(r"(?i)\bindia\b"),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("location patterns are valid literals")
}

fn category_pattern(kind: DisasterType) -> &'static Regex {
    let p = patterns();
    match kind {
        DisasterType::Wildfire => &p.wildfire,
        DisasterType::Storm => &p.storm,
        DisasterType::Earthquake => &p.earthquake,
        DisasterType::Flood => &p.flood,
    }
}

/// Approximate bounding box of the Indian subcontinent.
pub fn is_in_india(lat: f64, lon: f64) -> bool {
    (6.0..=37.0).contains(&lat) && (68.0..=98.0).contains(&lon)
}

/// Word boundaries (`\b`) are Unicode-aware: accented letters count as word
/// characters, so `Café5` is one token and its digit is not stripped.
pub fn clean_location_from_title(title: &str, kind: DisasterType, lat: f64, lon: f64) -> String {
    let p = patterns();
    let mut text = title.to_string();

    if let Some((_, tail)) = text.rsplit_once(" - ") {
        text = tail.to_string();
    }

    if p.whole_word_in.is_match(&text) {
        // ASCII lowercasing keeps byte offsets aligned with `text`
        if let Some(idx) = text.to_ascii_lowercase().rfind(" in ") {
            text = text[idx + 4..].to_string();
        }
    }

    text = category_pattern(kind).replace_all(&text, "").into_owned();
    text = p.generic.replace_all(&text, "").into_owned();
    text = p.numbers.replace_all(&text, "").into_owned();

    text = p
        .punctuation
        .replace_all(&text, |caps: &Captures| {
            if caps[0].contains(',') {
                ", "
            } else {
                " "
            }
        })
        .into_owned();
    text = p.whitespace.replace_all(&text, " ").into_owned();
    text = trim_separators(&text).to_string();

    text = p.trailing_in.replace(&text, "").into_owned();
    text = trim_separators(&text).to_string();

    if text.is_empty() {
        text = UNKNOWN_LOCATION.to_string();
    }

    if is_in_india(lat, lon) && !p.india.is_match(&text) {
        text.push_str(", India");
    }
    text
}

fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c == ',' || c.is_whitespace())
}
