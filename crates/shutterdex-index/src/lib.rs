//! Media indexing engine for shutterdex.
//!
//! This crate walks a user-selected folder tree under strict depth and
//! result ceilings, produces an embeddable preview per supported file,
//! extracts best-effort capture metadata, and snapshots the result to a
//! JSON sidecar. Key properties:
//!
//! - **Bounded traversal**: explicit worklist with a shared result budget
//!   and a depth ceiling; sibling directories are visited sequentially,
//!   per-file work runs concurrently.
//! - **Best-effort everywhere**: unreadable directories, failed decodes
//!   and failed external tools each cost one record at most, never the
//!   scan.
//! - **Pluggable platform seams**: [`MetadataProvider`], [`Transcoder`]
//!   and [`PreviewStore`] have null implementations for hosts without the
//!   OS facilities.
//!
//! # Example
//!
//! ```rust,no_run
//! use shutterdex_index::{MediaScanner, ScanConfig};
//!
//! # async fn run() {
//! let config = ScanConfig::new("/photos/library");
//! let outcome = MediaScanner::new(config).scan().await;
//!
//! println!("{} media files indexed", outcome.len());
//! # }
//! ```

mod geo;
mod metadata;
mod persist;
mod preview;
mod provider;
mod scanner;
mod store;

pub use geo::country_for;
pub use metadata::{CaptureMetadata, MetadataExtractor, normalize_date, parse_fields};
pub use persist::{SNAPSHOT_FILE, persist_snapshot};
pub use preview::{
    MAX_PREVIEW_WIDTH, NullTranscoder, PreviewRenderer, Transcoder, default_transcoder,
};
pub use provider::{
    KEY_COUNTRY, KEY_CREATION_DATE, KEY_LATITUDE, KEY_LONGITUDE, MetadataProvider,
    NullMetadataProvider, default_provider,
};
pub use scanner::MediaScanner;
pub use store::{DiskPreviewStore, MemoryPreviewStore, PreviewStore, cache_key};

#[cfg(target_os = "macos")]
pub use preview::SipsTranscoder;
#[cfg(target_os = "macos")]
pub use provider::SpotlightProvider;

// Re-export core types for convenience
pub use shutterdex_core::{
    ImageKind, IndexError, IndexWarning, MediaRecord, PersistedItem, PersistedSnapshot,
    ScanConfig, ScanOutcome, WarningKind,
};
