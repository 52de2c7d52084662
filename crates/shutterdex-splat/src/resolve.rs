//! Splat companion resolution and header preview.

use std::path::Path;

use compact_str::CompactString;
use tokio::io::AsyncReadExt;

use shutterdex_core::SplatRecord;

/// Fixed subfolder under an album root holding companion scans.
pub const SPLAT_DIR: &str = "splats";

/// Recognized scan extensions, tried in priority order.
pub const SPLAT_EXTENSIONS: &[&str] = &["ply", "splat", "spz"];

/// How much of the file is read for the preview and classification.
pub const PREVIEW_WINDOW_BYTES: usize = 96 * 1024;

/// How many leading lines make up the textual preview.
pub const PREVIEW_LINES: usize = 36;

/// Case-insensitive marker declaring a binary format in a header.
const BINARY_MARKER: &str = "format binary";

/// Resolve the companion scan for `image_name` under `album`.
///
/// Any directory components in the supplied name are stripped before
/// lookup. The first existing candidate wins; once a candidate is chosen,
/// any read failure yields `None` for the whole resolution rather than a
/// partial record.
pub async fn resolve_splat(album: &Path, image_name: &str) -> Option<SplatRecord> {
    let base = Path::new(image_name).file_name()?;
    let stem = Path::new(base).file_stem()?.to_str()?;

    for ext in SPLAT_EXTENSIONS {
        let candidate = album.join(SPLAT_DIR).join(format!("{stem}.{ext}"));
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return read_record(&candidate).await;
        }
    }

    tracing::debug!(album = %album.display(), image = image_name, "no splat companion");
    None
}

/// Build the record from the leading window of the chosen candidate.
async fn read_record(path: &Path) -> Option<SplatRecord> {
    let mut file = tokio::fs::File::open(path).await.ok()?;
    let mut window = vec![0u8; PREVIEW_WINDOW_BYTES];
    let mut filled = 0;
    while filled < window.len() {
        match file.read(&mut window[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(_) => return None,
        }
    }
    window.truncate(filled);

    let text = String::from_utf8_lossy(&window);
    let is_binary = text.to_ascii_lowercase().contains(BINARY_MARKER);

    let preview: String = text
        .lines()
        .take(PREVIEW_LINES)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string();
    let preview = (!preview.is_empty()).then_some(preview);

    let name = path
        .file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_default();

    Some(SplatRecord {
        url: format!("file://{}", path.display()),
        name,
        path: path.to_path_buf(),
        preview,
        is_binary,
    })
}
