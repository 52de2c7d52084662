//! Durable JSON snapshot of scan metadata.

use std::path::Path;

use chrono::Utc;

use shutterdex_core::{IndexError, MediaRecord, PersistedSnapshot};

/// Fixed snapshot filename, one per metadata folder.
pub const SNAPSHOT_FILE: &str = "media-metadata.json";

/// Write the snapshot for `records` into `dir`, creating the folder as
/// needed and overwriting any prior snapshot wholesale. Previews are
/// excluded; they are regenerable.
///
/// Persistence is auxiliary output: callers log a failure and move on,
/// the scan result itself is unaffected.
pub async fn persist_snapshot(records: &[MediaRecord], dir: &Path) -> Result<(), IndexError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| IndexError::io(dir, e))?;

    let snapshot = PersistedSnapshot::from_records(records, Utc::now().to_rfc3339());
    let json = serde_json::to_vec_pretty(&snapshot)?;

    let target = dir.join(SNAPSHOT_FILE);
    tokio::fs::write(&target, json)
        .await
        .map_err(|e| IndexError::io(target.clone(), e))?;

    tracing::debug!(target = %target.display(), total = snapshot.total, "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(name: &str) -> MediaRecord {
        MediaRecord {
            name: name.into(),
            path: PathBuf::from(format!("/lib/album/{name}")),
            preview: "data:image/png;base64,AA==".to_string(),
            extension: "png".into(),
            captured_at: Some("2024-03-01T12:00:00+00:00".to_string()),
            location: None,
            country: None,
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn test_snapshot_written_and_parseable() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("meta");

        let records = vec![record("a.png"), record("b.png")];
        persist_snapshot(&records, &dir).await.unwrap();

        let raw = std::fs::read(dir.join(SNAPSHOT_FILE)).unwrap();
        let parsed: PersistedSnapshot = serde_json::from_slice(&raw).unwrap();

        assert_eq!(parsed.total, 2);
        assert_eq!(parsed.total, parsed.items.len());
        assert_eq!(parsed.items[0].name, "a.png");
        assert!(!parsed.generated_at.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_overwrites_prior() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();

        persist_snapshot(&[record("a.png"), record("b.png")], &dir)
            .await
            .unwrap();
        persist_snapshot(&[record("only.png")], &dir).await.unwrap();

        let raw = std::fs::read(dir.join(SNAPSHOT_FILE)).unwrap();
        let parsed: PersistedSnapshot = serde_json::from_slice(&raw).unwrap();
        assert_eq!(parsed.total, 1);
        assert_eq!(parsed.items[0].name, "only.png");
    }
}
