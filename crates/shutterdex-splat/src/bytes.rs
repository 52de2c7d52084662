//! Validated raw-byte retrieval for external rendering.

use std::path::Path;

use crate::resolve::SPLAT_EXTENSIONS;

/// Hard ceiling on the size of a splat file handed to the renderer.
pub const MAX_SPLAT_BYTES: u64 = 512 * 1024 * 1024;

/// Read the full content of a validated splat file.
///
/// The path must carry a recognized scan extension (case-insensitive) and
/// point at a regular file at or below [`MAX_SPLAT_BYTES`]. Anything else,
/// including any I/O error, yields `None`. The bytes are returned
/// uninterpreted; format parsing is the renderer's concern.
pub async fn read_splat_bytes(path: &Path) -> Option<Vec<u8>> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if !SPLAT_EXTENSIONS.contains(&ext.as_str()) {
        tracing::debug!(path = %path.display(), "splat extension rejected");
        return None;
    }

    let meta = tokio::fs::metadata(path).await.ok()?;
    if !meta.is_file() || meta.len() > MAX_SPLAT_BYTES {
        tracing::debug!(
            path = %path.display(),
            size = meta.len(),
            "splat rejected by size or type check"
        );
        return None;
    }

    tokio::fs::read(path).await.ok()
}
