//! Media and splat record types, scan outcome, persisted snapshot.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::IndexWarning;

/// One indexed, previewable media file plus its derived metadata.
///
/// A record only exists for files whose extension is supported and for
/// which a preview could be produced. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    /// File name (not full path).
    pub name: CompactString,

    /// Absolute path of the source file.
    pub path: PathBuf,

    /// Embeddable preview reference (data URI), regenerable and therefore
    /// never persisted.
    pub preview: String,

    /// Lower-cased extension without the dot.
    pub extension: CompactString,

    /// Capture time, ISO-8601 when parseable, else the raw platform string.
    pub captured_at: Option<String>,

    /// Display label for the capture location.
    pub location: Option<String>,

    /// Country name, from the platform or the offline fallback table.
    pub country: Option<String>,

    /// Capture latitude in decimal degrees.
    pub latitude: Option<f64>,

    /// Capture longitude in decimal degrees.
    pub longitude: Option<f64>,
}

/// Complete result of one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Records sorted by absolute path (numeric-aware, case-insensitive),
    /// never longer than the configured result cap.
    pub records: Vec<MediaRecord>,

    /// Root folder that was scanned.
    pub root_path: PathBuf,

    /// When this scan was performed.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Non-fatal warnings collected along the way.
    pub warnings: Vec<IndexWarning>,
}

impl ScanOutcome {
    /// An empty outcome for an invalid root.
    pub fn empty(root_path: PathBuf, warnings: Vec<IndexWarning>) -> Self {
        Self {
            records: Vec::new(),
            root_path,
            scanned_at: SystemTime::now(),
            scan_duration: Duration::ZERO,
            warnings,
        }
    }

    /// Number of records in the outcome.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the scan produced no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A companion 3D-scan file resolved for a photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplatRecord {
    /// Splat file name.
    pub name: CompactString,

    /// Absolute path of the splat file.
    pub path: PathBuf,

    /// URL reference handed to the display layer.
    pub url: String,

    /// First header lines of the file, trimmed. `None` when empty.
    pub preview: Option<String>,

    /// Whether the file declares a binary format in its header.
    pub is_binary: bool,
}

/// Durable snapshot of a scan, previews excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    /// ISO-8601 generation timestamp.
    pub generated_at: String,

    /// Number of items, always `items.len()`.
    pub total: usize,

    /// Per-file metadata entries.
    pub items: Vec<PersistedItem>,
}

/// One media record as persisted: the preview reference is regenerable
/// and deliberately omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedItem {
    pub name: CompactString,
    pub path: PathBuf,
    pub ext: CompactString,
    pub captured_at: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&MediaRecord> for PersistedItem {
    fn from(record: &MediaRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            ext: record.extension.clone(),
            captured_at: record.captured_at.clone(),
            location: record.location.clone(),
            country: record.country.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}

impl PersistedSnapshot {
    /// Build a snapshot from scan records with the given generation stamp.
    pub fn from_records(records: &[MediaRecord], generated_at: String) -> Self {
        let items: Vec<PersistedItem> = records.iter().map(PersistedItem::from).collect();
        Self {
            generated_at,
            total: items.len(),
            items,
        }
    }
}
