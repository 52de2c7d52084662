//! Supported image formats and MIME classification.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A supported still-image format, classified from the file extension.
///
/// Supported-ness is decided purely by the lower-cased extension against a
/// fixed allow-list; no file content is inspected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    Tiff,
    Avif,
    Heic,
    Heif,
}

impl ImageKind {
    /// Classify a path by its extension. `None` means "not a supported
    /// image" and signals skip, not failure.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::from_extension(&ext)
    }

    /// Classify a bare, already lower-cased extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            "tiff" | "tif" => Some(Self::Tiff),
            "avif" => Some(Self::Avif),
            "heic" => Some(Self::Heic),
            "heif" => Some(Self::Heif),
            _ => None,
        }
    }

    /// MIME type for formats that can be embedded directly as data.
    /// `None` marks formats that require transcoding first.
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            Self::Jpeg => Some("image/jpeg"),
            Self::Png => Some("image/png"),
            Self::Gif => Some("image/gif"),
            Self::Webp => Some("image/webp"),
            Self::Bmp => Some("image/bmp"),
            Self::Tiff => Some("image/tiff"),
            Self::Avif => Some("image/avif"),
            Self::Heic | Self::Heif => None,
        }
    }

    /// Whether this format needs an external transcode before display.
    pub fn requires_transcode(&self) -> bool {
        self.mime_type().is_none()
    }

    /// Canonical extension for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Avif => "avif",
            Self::Heic => "heic",
            Self::Heif => "heif",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_classify_supported() {
        assert_eq!(
            ImageKind::from_path(Path::new("/a/photo.JPG")),
            Some(ImageKind::Jpeg)
        );
        assert_eq!(
            ImageKind::from_path(Path::new("shot.tif")),
            Some(ImageKind::Tiff)
        );
        assert_eq!(
            ImageKind::from_path(Path::new("pano.heic")),
            Some(ImageKind::Heic)
        );
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(ImageKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(ImageKind::from_path(Path::new("clip.mp4")), None);
        assert_eq!(ImageKind::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_mime_table() {
        assert_eq!(ImageKind::Png.mime_type(), Some("image/png"));
        assert_eq!(ImageKind::Webp.mime_type(), Some("image/webp"));
        assert_eq!(ImageKind::Heic.mime_type(), None);
        assert_eq!(ImageKind::Heif.mime_type(), None);
    }

    #[test]
    fn test_requires_transcode() {
        assert!(ImageKind::Heic.requires_transcode());
        assert!(ImageKind::Heif.requires_transcode());
        assert!(!ImageKind::Jpeg.requires_transcode());
    }
}
