//! Core types and configuration for shutterdex.
//!
//! This crate provides the fundamental data structures shared by the
//! indexing engine and the splat resolver: media records, scan outcomes,
//! the format classifier, and the error/warning taxonomy. It performs
//! no I/O of its own.

mod config;
mod error;
mod format;
mod order;
mod record;

pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_RESULTS, ScanConfig, ScanConfigBuilder};
pub use error::{IndexError, IndexWarning, WarningKind};
pub use format::ImageKind;
pub use order::{natural_cmp, natural_path_cmp};
pub use record::{
    MediaRecord, PersistedItem, PersistedSnapshot, ScanOutcome, SplatRecord,
};
