//! Preview generation: native decode, transcode cache, direct embed.

use std::io::Cursor;
use std::path::Path;
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::imageops::FilterType;

use shutterdex_core::ImageKind;

use crate::store::{DiskPreviewStore, PreviewStore, cache_key};

/// Previews wider than this are downscaled (aspect preserved).
pub const MAX_PREVIEW_WIDTH: u32 = 1280;

/// External image-conversion capability.
///
/// `to_jpeg` converts `src` into a JPEG at `dest` and reports success. The
/// null implementation always reports failure, which the renderer treats
/// as "no converter on this platform".
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn to_jpeg(&self, src: &Path, dest: &Path) -> bool;
}

/// Transcoder for platforms without a system conversion utility.
pub struct NullTranscoder;

#[async_trait]
impl Transcoder for NullTranscoder {
    async fn to_jpeg(&self, _src: &Path, _dest: &Path) -> bool {
        false
    }
}

/// `sips`-backed transcoder, macOS only.
#[cfg(target_os = "macos")]
pub struct SipsTranscoder;

#[cfg(target_os = "macos")]
#[async_trait]
impl Transcoder for SipsTranscoder {
    async fn to_jpeg(&self, src: &Path, dest: &Path) -> bool {
        let status = tokio::process::Command::new("sips")
            .arg("-s")
            .arg("format")
            .arg("jpeg")
            .arg(src)
            .arg("--out")
            .arg(dest)
            .output()
            .await;
        match status {
            Ok(output) => output.status.success(),
            Err(err) => {
                tracing::debug!(%err, "sips invocation failed");
                false
            }
        }
    }
}

/// The best transcoder for the current platform.
pub fn default_transcoder() -> Box<dyn Transcoder> {
    #[cfg(target_os = "macos")]
    {
        Box::new(SipsTranscoder)
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(NullTranscoder)
    }
}

/// Produces an embeddable preview reference for a media file, or `None`
/// when every attempt fails (the file is then excluded from the scan).
pub struct PreviewRenderer {
    transcoder: Box<dyn Transcoder>,
    store: Box<dyn PreviewStore>,
}

impl PreviewRenderer {
    /// Renderer with the platform transcoder and the temp-dir disk cache.
    pub fn new() -> Self {
        Self {
            transcoder: default_transcoder(),
            store: Box::new(DiskPreviewStore::in_temp()),
        }
    }

    /// Renderer with explicit capabilities (tests, embedding hosts).
    pub fn with_parts(transcoder: Box<dyn Transcoder>, store: Box<dyn PreviewStore>) -> Self {
        Self { transcoder, store }
    }

    /// Render a preview for `path`, classified as `kind`.
    ///
    /// Attempts, first success wins: native decode (any codec the `image`
    /// crate understands, whatever the declared extension), then the
    /// transcode cache for heic/heif, then a direct MIME embed of the raw
    /// bytes. A transcode-required format that fails here does not fall
    /// through.
    pub async fn render(&self, path: &Path, kind: ImageKind) -> Option<String> {
        let bytes = tokio::fs::read(path).await.ok();

        if let Some(reference) = bytes.as_deref().and_then(decode_downscaled) {
            return Some(reference);
        }

        if kind.requires_transcode() {
            return self.render_transcoded(path).await;
        }

        let mime = kind.mime_type()?;
        Some(data_uri(mime, &bytes?))
    }

    /// Transcode through the content-addressed cache.
    async fn render_transcoded(&self, path: &Path) -> Option<String> {
        let meta = tokio::fs::metadata(path).await.ok()?;
        let mtime_millis = meta
            .modified()
            .ok()?
            .duration_since(UNIX_EPOCH)
            .ok()?
            .as_millis();
        let key = cache_key(path, meta.len(), mtime_millis);

        if let Some(cached) = self.store.get(&key).await {
            return Some(data_uri("image/jpeg", &cached));
        }

        let scratch = tempfile::Builder::new()
            .prefix("sdx-transcode-")
            .suffix(".jpg")
            .tempfile()
            .ok()?;
        if !self.transcoder.to_jpeg(path, scratch.path()).await {
            tracing::debug!(path = %path.display(), "transcode failed or unavailable");
            return None;
        }

        let jpeg = tokio::fs::read(scratch.path()).await.ok()?;
        if jpeg.is_empty() {
            return None;
        }
        self.store.put(&key, &jpeg).await;
        Some(data_uri("image/jpeg", &jpeg))
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode, downscale to the width ceiling only if wider, re-encode as a
/// PNG data URI. `None` on decode failure or an empty bitmap.
fn decode_downscaled(bytes: &[u8]) -> Option<String> {
    let img = image::load_from_memory(bytes).ok()?;
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return None;
    }

    let img = if width > MAX_PREVIEW_WIDTH {
        let target_height =
            ((height as u64 * MAX_PREVIEW_WIDTH as u64) / width as u64).max(1) as u32;
        img.resize_exact(MAX_PREVIEW_WIDTH, target_height, FilterType::Lanczos3)
    } else {
        img
    };

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .ok()?;
    Some(data_uri("image/png", &buf))
}

/// Build a `data:` URI for the given MIME type and payload.
fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}
