//! Platform content-metadata providers.
//!
//! The extractor depends only on the [`MetadataProvider`] seam; concrete
//! implementations wrap whatever OS facility is available. Failures are
//! never surfaced past the trait boundary: a provider that cannot answer
//! returns `None` and the extractor falls through to the next source.

use std::path::Path;

use async_trait::async_trait;

/// Provider keys recognized by the extractor, in the raw `key = value`
/// output of [`MetadataProvider::query`].
pub const KEY_CREATION_DATE: &str = "ContentCreationDate";
pub const KEY_LATITUDE: &str = "Latitude";
pub const KEY_LONGITUDE: &str = "Longitude";
pub const KEY_COUNTRY: &str = "Country";

/// A source of per-file capture metadata, typically an OS metadata index.
///
/// `query` returns the raw textual `key = value` output for the file, or
/// `None` when the platform exposes no such facility or the lookup failed.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn query(&self, path: &Path) -> Option<String>;
}

/// Provider for platforms without a content-metadata index.
pub struct NullMetadataProvider;

#[async_trait]
impl MetadataProvider for NullMetadataProvider {
    async fn query(&self, _path: &Path) -> Option<String> {
        None
    }
}

/// Spotlight-backed provider (`mdls`), macOS only.
#[cfg(target_os = "macos")]
pub struct SpotlightProvider;

#[cfg(target_os = "macos")]
#[async_trait]
impl MetadataProvider for SpotlightProvider {
    async fn query(&self, path: &Path) -> Option<String> {
        let output = tokio::process::Command::new("mdls")
            .arg("-name")
            .arg("kMDItemContentCreationDate")
            .arg("-name")
            .arg("kMDItemLatitude")
            .arg("-name")
            .arg("kMDItemLongitude")
            .arg("-name")
            .arg("kMDItemCountry")
            .arg(path)
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            tracing::debug!(path = %path.display(), "mdls exited nonzero");
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// The best provider for the current platform.
pub fn default_provider() -> Box<dyn MetadataProvider> {
    #[cfg(target_os = "macos")]
    {
        Box::new(SpotlightProvider)
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(NullMetadataProvider)
    }
}
