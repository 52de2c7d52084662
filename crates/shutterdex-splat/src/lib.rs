//! Companion 3D-scan ("splat") resolution for shutterdex.
//!
//! Photos may carry a companion point-cloud scan next to them, located by
//! naming convention: `<album>/splats/<image stem>.{ply,splat,spz}`. This
//! crate resolves that companion, produces a bounded textual preview with
//! a binary/text classification, hands validated raw bytes to an external
//! renderer, and reads just enough of a `.ply` header to describe the
//! vertex layout. It never interprets point data.

mod bytes;
mod ply;
mod resolve;

pub use bytes::{MAX_SPLAT_BYTES, read_splat_bytes};
pub use ply::{PlyFormat, PlyHeader, PlyProperty, PlyScalar};
pub use resolve::{
    PREVIEW_LINES, PREVIEW_WINDOW_BYTES, SPLAT_DIR, SPLAT_EXTENSIONS, resolve_splat,
};

// Re-export the record type for convenience
pub use shutterdex_core::SplatRecord;
