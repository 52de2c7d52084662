//! Content-addressed store for transcoded preview entries.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Subfolder under the process temp root holding transcoded previews.
const CACHE_DIR_NAME: &str = "shutterdex-previews";

/// Derive the cache key for a source file: a hex BLAKE3 digest over the
/// absolute path, byte size, and mtime in milliseconds. Any change to the
/// file's identity produces a new key; stale entries are simply never
/// read again.
pub fn cache_key(path: &Path, size: u64, mtime_millis: u128) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(path.as_os_str().as_encoded_bytes());
    hasher.update(&size.to_le_bytes());
    hasher.update(&mtime_millis.to_le_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Keyed byte store backing the preview cache.
///
/// `get`/`put` are best-effort: a failed read is a miss, a failed write is
/// dropped. Concurrent writers racing on the same key land on the same
/// eventual content, so no locking is needed.
#[async_trait]
pub trait PreviewStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Vec<u8>>;
    async fn put(&self, key: &str, bytes: &[u8]);
}

/// Filesystem-backed store with `{key}.jpg` entries.
pub struct DiskPreviewStore {
    root: PathBuf,
}

impl DiskPreviewStore {
    /// Store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under the process temp root; entries accumulate across runs
    /// until the platform reclaims them.
    pub fn in_temp() -> Self {
        Self::new(std::env::temp_dir().join(CACHE_DIR_NAME))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.jpg"))
    }
}

#[async_trait]
impl PreviewStore for DiskPreviewStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        tokio::fs::read(self.entry_path(key)).await.ok()
    }

    async fn put(&self, key: &str, bytes: &[u8]) {
        if let Err(err) = tokio::fs::create_dir_all(&self.root).await {
            tracing::warn!(dir = %self.root.display(), %err, "preview cache dir unavailable");
            return;
        }
        if let Err(err) = tokio::fs::write(self.entry_path(key), bytes).await {
            tracing::warn!(key, %err, "preview cache write failed");
        }
    }
}

/// In-memory store, substitutable for the disk store in tests.
#[derive(Default)]
pub struct MemoryPreviewStore {
    entries: std::sync::Mutex<std::collections::HashMap<String, Vec<u8>>>,
}

impl MemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreviewStore for MemoryPreviewStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn put(&self, key: &str, bytes: &[u8]) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_stable() {
        let a = cache_key(Path::new("/lib/album/p.heic"), 1024, 1_700_000_000_000);
        let b = cache_key(Path::new("/lib/album/p.heic"), 1024, 1_700_000_000_000);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_cache_key_tracks_identity() {
        let base = cache_key(Path::new("/lib/album/p.heic"), 1024, 1_700_000_000_000);
        assert_ne!(base, cache_key(Path::new("/lib/album/q.heic"), 1024, 1_700_000_000_000));
        assert_ne!(base, cache_key(Path::new("/lib/album/p.heic"), 1025, 1_700_000_000_000));
        assert_ne!(base, cache_key(Path::new("/lib/album/p.heic"), 1024, 1_700_000_000_001));
    }

    #[tokio::test]
    async fn test_disk_store_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DiskPreviewStore::new(tmp.path().join("previews"));

        assert!(store.get("deadbeef").await.is_none());
        store.put("deadbeef", b"jpeg bytes").await;
        assert_eq!(store.get("deadbeef").await.as_deref(), Some(&b"jpeg bytes"[..]));

        // Entries are plain files named after the key.
        assert!(tmp.path().join("previews/deadbeef.jpg").is_file());
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryPreviewStore::new();
        assert!(store.get("k").await.is_none());
        store.put("k", &[1, 2, 3]).await;
        assert_eq!(store.get("k").await, Some(vec![1, 2, 3]));
    }
}
