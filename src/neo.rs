//! NEO aggregation, statistics, and display formatting.
//!
//! The feed arrives keyed by date; every view wants one flat list, biggest
//! rocks first. Encounter order (ascending feed date, then within-date
//! order) breaks diameter ties, which the stable sort preserves.

use crate::models::{NearEarthObject, NeoFeed};

/// Summary figures for a feed, in display form.
#[derive(Debug, Clone, PartialEq)]
pub struct NeoStats<'a> {
    /// Objects across all dates.
    pub total: usize,
    /// Of those, potentially hazardous ones.
    pub hazardous: usize,
    /// Mean estimated maximum diameter in km, two decimals. `"0.00"` for an
    /// empty feed, the documented policy for the undefined empty case.
    pub avg_diameter: String,
    /// The largest object, when any exist.
    pub largest: Option<&'a NearEarthObject>,
}

/// Every object across all dates, sorted descending by estimated maximum
/// diameter. Ties keep encounter order.
pub fn flatten(feed: &NeoFeed) -> Vec<&NearEarthObject> {
    let mut objects: Vec<&NearEarthObject> = feed
        .near_earth_objects
        .values()
        .flatten()
        .collect();
    // sort_by is stable; total_cmp keeps any NaN from poisoning the order.
    objects.sort_by(|a, b| b.max_diameter_km().total_cmp(&a.max_diameter_km()));
    objects
}

/// Derives the stat block from a feed.
pub fn stats(feed: &NeoFeed) -> NeoStats<'_> {
    let objects = flatten(feed);
    let hazardous = objects
        .iter()
        .filter(|o| o.is_potentially_hazardous_asteroid)
        .count();
    let avg_diameter = if objects.is_empty() {
        "0.00".to_owned()
    } else {
        let sum: f64 = objects.iter().map(|o| o.max_diameter_km()).sum();
        format!("{:.2}", sum / objects.len() as f64)
    };

    NeoStats {
        total: objects.len(),
        hazardous,
        avg_diameter,
        largest: objects.first().copied(),
    }
}

/// Miss distance for display: megakilometers past a million, en-US
/// thousands grouping below it.
///
/// `format_distance(2_500_000.0)` → `"2.50M km"`,
/// `format_distance(500.0)` → `"500 km"`.
pub fn format_distance(km: f64) -> String {
    if km >= 1_000_000.0 {
        format!("{:.2}M km", km / 1_000_000.0)
    } else {
        format!("{} km", group_thousands(km))
    }
}

/// Relative velocity for display: `"12.35 km/s"`.
pub fn format_velocity(km_per_sec: f64) -> String {
    format!("{km_per_sec:.2} km/s")
}

/// en-US style number: comma-grouped integer part, up to three fraction
/// digits with trailing zeros dropped.
fn group_thousands(value: f64) -> String {
    let millis = (value.abs() * 1000.0).round() as u64;
    let whole = millis / 1000;
    let frac = millis % 1000;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if value < 0.0 && millis > 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if frac > 0 {
        let trailing = format!("{frac:03}");
        out.push('.');
        out.push_str(trailing.trim_end_matches('0'));
    }
    out
}
