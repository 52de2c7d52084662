//! Bounded recursive media scanner.

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

use compact_str::CompactString;
use futures::future;

use shutterdex_core::{
    ImageKind, IndexWarning, MediaRecord, ScanConfig, ScanOutcome, WarningKind, natural_path_cmp,
};

use crate::metadata::MetadataExtractor;
use crate::persist::persist_snapshot;
use crate::preview::PreviewRenderer;

/// Walks a folder tree under depth and result ceilings, producing one
/// [`MediaRecord`] per supported, previewable file.
///
/// The traversal is an explicit worklist of `(dir, depth)` frames rather
/// than call-stack recursion, so the remaining-result budget shared across
/// the whole recursion stays observable: sibling directories are visited
/// sequentially, while the files inside one directory are indexed
/// concurrently and awaited together. No single unreadable entry aborts
/// the scan.
pub struct MediaScanner {
    config: ScanConfig,
    extractor: MetadataExtractor,
    renderer: PreviewRenderer,
}

impl MediaScanner {
    /// Scanner with the platform's default metadata and preview stack.
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            extractor: MetadataExtractor::new(),
            renderer: PreviewRenderer::new(),
        }
    }

    /// Scanner with explicit capabilities (tests, embedding hosts).
    pub fn with_parts(
        config: ScanConfig,
        extractor: MetadataExtractor,
        renderer: PreviewRenderer,
    ) -> Self {
        Self {
            config,
            extractor,
            renderer,
        }
    }

    /// Run one scan. An invalid or non-directory root yields an empty
    /// outcome with a warning, never an error. When a metadata folder is
    /// configured, the snapshot write runs as a best-effort side effect.
    pub async fn scan(&self) -> ScanOutcome {
        let start = Instant::now();
        let root = self.config.root.clone();

        let root_is_dir = !root.as_os_str().is_empty()
            && tokio::fs::metadata(&root)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
        if !root_is_dir {
            return ScanOutcome::empty(root.clone(), vec![IndexWarning::invalid_root(root)]);
        }

        let mut records: Vec<MediaRecord> = Vec::new();
        let mut warnings: Vec<IndexWarning> = Vec::new();
        let mut remaining = self.config.max_results;

        let mut worklist: Vec<(PathBuf, u32)> = vec![(root.clone(), 0)];
        while let Some((dir, depth)) = worklist.pop() {
            if remaining == 0 {
                break;
            }

            let (files, subdirs) = self.list_dir(&dir, &mut warnings).await;

            let candidates: Vec<(PathBuf, ImageKind)> = files
                .into_iter()
                .filter_map(|path| ImageKind::from_path(&path).map(|kind| (path, kind)))
                .take(remaining)
                .collect();

            let indexed = future::join_all(
                candidates
                    .into_iter()
                    .map(|(path, kind)| self.index_file(path, kind)),
            )
            .await;

            for result in indexed {
                match result {
                    Ok(record) => {
                        records.push(record);
                        remaining = remaining.saturating_sub(1);
                    }
                    Err(path) => warnings.push(IndexWarning::preview_failed(path)),
                }
            }

            // Descend only while budget and depth allow; subdirectories are
            // pushed in reverse so they pop in listing order.
            if remaining > 0 && depth < self.config.max_depth {
                for sub in subdirs.into_iter().rev() {
                    worklist.push((sub, depth + 1));
                }
            }
        }

        records.sort_by(|a, b| natural_path_cmp(&a.path, &b.path));
        records.truncate(self.config.max_results);

        let outcome = ScanOutcome {
            records,
            root_path: root,
            scanned_at: SystemTime::now(),
            scan_duration: start.elapsed(),
            warnings,
        };

        if let Some(dir) = &self.config.metadata_dir {
            if let Err(err) = persist_snapshot(&outcome.records, dir).await {
                tracing::warn!(%err, dir = %dir.display(), "metadata snapshot write failed");
            }
        }

        outcome
    }

    /// List one directory into files and subdirectories. A listing failure
    /// yields empty sets plus a warning; the scan continues elsewhere.
    async fn list_dir(
        &self,
        dir: &Path,
        warnings: &mut Vec<IndexWarning>,
    ) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut files = Vec::new();
        let mut subdirs = Vec::new();

        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(err) => {
                warnings.push(IndexWarning::list_error(dir, &err));
                return (files, subdirs);
            }
        };

        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if self.config.should_skip_hidden(&name) {
                        continue;
                    }
                    match entry.file_type().await {
                        Ok(kind) if kind.is_dir() => subdirs.push(entry.path()),
                        Ok(kind) if kind.is_file() => files.push(entry.path()),
                        Ok(_) => {} // symlinks and special files skipped
                        Err(err) => warnings.push(IndexWarning::new(
                            entry.path(),
                            format!("Failed to stat entry: {err}"),
                            WarningKind::MetadataError,
                        )),
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    warnings.push(IndexWarning::list_error(dir, &err));
                    break;
                }
            }
        }

        (files, subdirs)
    }

    /// Index one file: preview and metadata run concurrently. A file whose
    /// preview fails in every path contributes nothing (`Err` carries the
    /// path for the warning).
    async fn index_file(&self, path: PathBuf, kind: ImageKind) -> Result<MediaRecord, PathBuf> {
        let (preview, meta) = tokio::join!(
            self.renderer.render(&path, kind),
            self.extractor.extract(&path)
        );

        let Some(preview) = preview else {
            return Err(path);
        };

        let name = path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| CompactString::new(e.to_string_lossy().to_ascii_lowercase()))
            .unwrap_or_default();

        Ok(MediaRecord {
            name,
            path,
            preview,
            extension,
            captured_at: meta.captured_at,
            location: meta.location,
            country: meta.country,
            latitude: meta.latitude,
            longitude: meta.longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        RgbImage::from_pixel(6, 4, image::Rgb([90, 60, 30]))
            .save(path)
            .unwrap();
    }

    fn create_album() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        write_png(&root.join("img10.png"));
        write_png(&root.join("img2.png"));
        write_png(&root.join("cover.png"));
        std::fs::write(root.join("notes.txt"), "not media").unwrap();

        std::fs::create_dir(root.join("trip")).unwrap();
        write_png(&root.join("trip/beach.png"));

        temp
    }

    #[tokio::test]
    async fn test_scan_collects_and_sorts_naturally() {
        let temp = create_album();
        let scanner = MediaScanner::new(ScanConfig::new(temp.path()));

        let outcome = scanner.scan().await;
        let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["cover.png", "img2.png", "img10.png", "beach.png"]);
    }

    #[tokio::test]
    async fn test_unsupported_extensions_produce_no_record() {
        let temp = create_album();
        let scanner = MediaScanner::new(ScanConfig::new(temp.path()));

        let outcome = scanner.scan().await;
        assert!(outcome.records.iter().all(|r| r.extension == "png"));
    }

    #[tokio::test]
    async fn test_result_cap_is_shared_across_recursion() {
        let temp = create_album();
        let config = ScanConfig::builder()
            .root(temp.path())
            .max_results(2usize)
            .build()
            .unwrap();
        let scanner = MediaScanner::new(config);

        let outcome = scanner.scan().await;
        assert_eq!(outcome.len(), 2);
    }

    #[tokio::test]
    async fn test_depth_ceiling_stops_descent() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_png(&root.join("top.png"));
        std::fs::create_dir_all(root.join("a/b")).unwrap();
        write_png(&root.join("a/mid.png"));
        write_png(&root.join("a/b/deep.png"));

        let config = ScanConfig::builder()
            .root(root)
            .max_depth(1u32)
            .build()
            .unwrap();
        let outcome = MediaScanner::new(config).scan().await;

        let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"top.png"));
        assert!(names.contains(&"mid.png"));
        assert!(!names.contains(&"deep.png"));
    }

    #[tokio::test]
    async fn test_invalid_root_yields_empty_outcome() {
        let scanner = MediaScanner::new(ScanConfig::new("/definitely/not/a/folder"));
        let outcome = scanner.scan().await;

        assert!(outcome.is_empty());
        assert_eq!(outcome.warnings[0].kind, WarningKind::InvalidRoot);
    }

    #[tokio::test]
    async fn test_file_root_yields_empty_outcome() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir.png");
        write_png(&file);

        let outcome = MediaScanner::new(ScanConfig::new(&file)).scan().await;
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_failed_preview_skips_without_aborting_siblings() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_png(&root.join("good.png"));
        // Supported extension, but no native decode and no transcoder on
        // the test platform: contributes nothing.
        std::fs::write(root.join("broken.heic"), b"not an image").unwrap();

        let outcome = MediaScanner::new(ScanConfig::new(root)).scan().await;
        let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["good.png"]);
        assert!(
            outcome
                .warnings
                .iter()
                .any(|w| w.kind == WarningKind::PreviewFailed)
        );
    }

    #[tokio::test]
    async fn test_hidden_entries_skipped_by_default() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_png(&root.join("shown.png"));
        write_png(&root.join(".hidden.png"));

        let outcome = MediaScanner::new(ScanConfig::new(root)).scan().await;
        let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["shown.png"]);
    }

    #[tokio::test]
    async fn test_rescan_is_equivalent() {
        let temp = create_album();
        let scanner = MediaScanner::new(ScanConfig::new(temp.path()));

        let first = scanner.scan().await;
        let second = scanner.scan().await;

        let paths = |o: &ScanOutcome| o.records.iter().map(|r| r.path.clone()).collect::<Vec<_>>();
        assert_eq!(paths(&first), paths(&second));
    }
}
