//! Typed views of the NASA payloads.
//!
//! Only the fields the explorer actually reads are modelled; everything else
//! the remote sends is ignored on deserialization. The NEO feed's numeric
//! strings (miss distance, velocity) stay strings here, exactly as the wire
//! carries them; parsing happens at the point of use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── APOD ──────────────────────────────────────────────────────────────────────

/// One Astronomy Picture of the Day entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodEntry {
    pub date: String,
    pub title: String,
    pub explanation: String,
    /// `"image"` or `"video"`.
    pub media_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl ApodEntry {
    /// Best image URL available: HD when present.
    pub fn best_url(&self) -> &str {
        self.hdurl.as_deref().unwrap_or(&self.url)
    }
}

// ── Mars Rover Photos ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsPhotosResponse {
    pub photos: Vec<MarsPhoto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsPhoto {
    pub id: u64,
    pub sol: u32,
    pub camera: RoverCamera,
    pub img_src: String,
    pub earth_date: String,
    pub rover: RoverInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverCamera {
    pub name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `/api/mars-manifests` payload (hardcoded to Curiosity upstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestResponse {
    pub photo_manifest: PhotoManifest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoManifest {
    pub name: String,
    pub landing_date: String,
    pub launch_date: String,
    pub status: String,
    pub max_sol: u32,
    pub max_date: String,
    pub total_photos: u64,
}

// ── Near Earth Objects ────────────────────────────────────────────────────────

/// The NEO feed: near-Earth objects keyed by approach date.
///
/// A `BTreeMap` fixes the date iteration order ascending, which is what
/// defines "encounter order" for the aggregator's stable sort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeoFeed {
    #[serde(default)]
    pub element_count: u32,
    pub near_earth_objects: BTreeMap<String, Vec<NearEarthObject>>,
}

/// One near-Earth object as the feed reports it. The explorer reads and
/// sorts these, never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    pub id: String,
    #[serde(default)]
    pub neo_reference_id: String,
    pub name: String,
    #[serde(default)]
    pub absolute_magnitude_h: f64,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

impl NearEarthObject {
    /// Estimated maximum diameter in kilometers, the sort key for every
    /// NEO listing.
    pub fn max_diameter_km(&self) -> f64 {
        self.estimated_diameter.kilometers.estimated_diameter_max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: String,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    #[serde(default)]
    pub orbiting_body: String,
}

/// Decimal string, e.g. `"14.0131"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_second: String,
}

/// Decimal string, e.g. `"46653915.46"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

// ── Image and Video Library ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSearchResponse {
    pub collection: ImageCollection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCollection {
    pub items: Vec<ImageItem>,
}

/// One search hit. `data` holds the metadata records, `links` the renditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageItem {
    pub data: Vec<ImageData>,
    #[serde(default)]
    pub links: Vec<ImageLink>,
}

impl ImageItem {
    /// The first metadata record, which the library always populates.
    pub fn record(&self) -> Option<&ImageData> {
        self.data.first()
    }

    /// Thumbnail / preview URL, when the item carries one.
    pub fn thumbnail(&self) -> Option<&str> {
        self.links.first().and_then(|l| l.href.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    pub nasa_id: String,
    pub title: String,
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
}

// ── EPIC ──────────────────────────────────────────────────────────────────────

/// One Earth Polychromatic Imaging Camera frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicImage {
    pub identifier: String,
    pub image: String,
    #[serde(default)]
    pub caption: String,
    pub date: String,
}

// ── Health ────────────────────────────────────────────────────────────────────

/// `/api/health` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}
