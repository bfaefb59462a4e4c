use chrono::{DateTime, Local, NaiveDateTime};

use crate::app::movie::MAX_RATING;

/// Five stars with the first `rating` filled, or "No rating".
pub fn stars(rating: Option<i32>) -> String {
    match rating.filter(|r| *r > 0) {
        Some(rating) => (1..=MAX_RATING).map(|star| if star <= rating { '★' } else { '☆' }).collect(),
        None => "No rating".to_string(),
    }
}

/// Renders a service timestamp as a local date; unknown formats are shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format("%Y-%m-%d").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
