//! Capture-metadata extraction with ordered fallbacks.

use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::geo;
use crate::provider::{
    KEY_COUNTRY, KEY_CREATION_DATE, KEY_LATITUDE, KEY_LONGITUDE, MetadataProvider,
    default_provider,
};

/// Capture metadata for one file, every field best-effort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureMetadata {
    pub captured_at: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Extracts capture time, coordinates and location labels for media files.
///
/// The chain per file: platform provider query, then coordinate-derived
/// labels and the offline country table, then filesystem timestamps.
/// Extraction cannot fail; every field defaults to `None`.
pub struct MetadataExtractor {
    provider: Box<dyn MetadataProvider>,
}

impl MetadataExtractor {
    /// Extractor backed by the platform's default provider.
    pub fn new() -> Self {
        Self {
            provider: default_provider(),
        }
    }

    /// Extractor with an explicit provider (tests, headless platforms).
    pub fn with_provider(provider: Box<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Derive capture metadata for the file at `path`.
    pub async fn extract(&self, path: &Path) -> CaptureMetadata {
        let mut meta = CaptureMetadata::default();

        if let Some(raw) = self.provider.query(path).await {
            let fields = parse_fields(&raw);

            if let Some(date) = fields.get(KEY_CREATION_DATE) {
                // An unparseable date is kept verbatim: the platform string
                // is already human-readable.
                meta.captured_at = Some(normalize_date(date));
            }

            let lat = fields.get(KEY_LATITUDE).and_then(|v| v.parse::<f64>().ok());
            let lon = fields.get(KEY_LONGITUDE).and_then(|v| v.parse::<f64>().ok());
            if let (Some(lat), Some(lon)) = (lat, lon) {
                if lat.is_finite() && lon.is_finite() {
                    meta.latitude = Some(lat);
                    meta.longitude = Some(lon);
                    meta.location = Some(format!("{lat:.6}, {lon:.6}"));
                }
            }

            meta.country = fields.get(KEY_COUNTRY).cloned();
        }

        if meta.country.is_none() {
            if let (Some(lat), Some(lon)) = (meta.latitude, meta.longitude) {
                meta.country = geo::country_for(lat, lon).map(str::to_string);
            }
        }

        // A resolved country takes display priority over raw coordinates.
        if let Some(country) = &meta.country {
            meta.location = Some(country.clone());
        }

        if meta.captured_at.is_none() {
            meta.captured_at = filesystem_timestamp(path).await;
        }

        meta
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `key = value` lines into a map keyed by recognized field names.
///
/// Values equal to the literal `(null)` or empty after unquoting are
/// treated as absent. Keys match on suffix so platform prefixes (e.g.
/// `kMDItem`) need no special handling.
pub fn parse_fields(output: &str) -> HashMap<&'static str, String> {
    let mut fields = HashMap::new();

    for line in output.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = unquote(value.trim());
        if value.is_empty() || value == "(null)" {
            continue;
        }

        for known in [KEY_CREATION_DATE, KEY_LATITUDE, KEY_LONGITUDE, KEY_COUNTRY] {
            if key.ends_with(known) {
                fields.insert(known, value.clone());
            }
        }
    }

    fields
}

/// Strip one layer of surrounding double quotes.
fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}

/// Normalize a raw creation-date string to ISO-8601 when one of the known
/// formats matches; otherwise return the raw string verbatim.
pub fn normalize_date(raw: &str) -> String {
    // Spotlight zone format: `2023-05-14 09:21:44 +0000`
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z") {
        return dt.to_rfc3339();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.to_rfc3339();
    }
    // EXIF colon format: `2023:05:14 09:21:44`
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y:%m:%d %H:%M:%S") {
        return naive.and_utc().to_rfc3339();
    }
    raw.to_string()
}

/// Fall back to the file's own creation time when the filesystem reports a
/// nonzero one, else its last-modified time, as ISO-8601. A failing stat
/// yields `None`.
async fn filesystem_timestamp(path: &Path) -> Option<String> {
    let meta = tokio::fs::metadata(path).await.ok()?;
    let time = meta
        .created()
        .ok()
        .filter(|t| *t > UNIX_EPOCH)
        .or_else(|| meta.modified().ok())?;
    Some(to_iso8601(time))
}

fn to_iso8601(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339()
}
