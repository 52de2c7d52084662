//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default cap on the total number of records a scan may return.
pub const DEFAULT_MAX_RESULTS: usize = 500;

/// Default maximum directory depth below the scan root.
pub const DEFAULT_MAX_DEPTH: u32 = 8;

/// Configuration for a media scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root folder to index.
    pub root: PathBuf,

    /// Cap on the total number of media records, shared across the whole
    /// recursion (not per directory).
    #[builder(default = "DEFAULT_MAX_RESULTS")]
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum directory depth to descend below the root (root is depth 0).
    #[builder(default = "DEFAULT_MAX_DEPTH")]
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Folder to receive the metadata snapshot sidecar. `None` disables
    /// snapshot persistence.
    #[builder(default)]
    #[serde(default)]
    pub metadata_dir: Option<PathBuf>,

    /// Include hidden files and directories (starting with `.`).
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a folder with default ceilings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_results: DEFAULT_MAX_RESULTS,
            max_depth: DEFAULT_MAX_DEPTH,
            metadata_dir: None,
            include_hidden: false,
        }
    }

    /// Check if an entry name should be skipped as hidden.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/photos")
            .max_results(50usize)
            .max_depth(2u32)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/photos"));
        assert_eq!(config.max_results, 50);
        assert_eq!(config.max_depth, 2);
        assert!(config.metadata_dir.is_none());
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/photos");
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.include_hidden);
    }

    #[test]
    fn test_empty_root_rejected() {
        let result = ScanConfig::builder().root("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_should_skip_hidden() {
        let mut config = ScanConfig::new("/photos");
        assert!(config.should_skip_hidden(".thumbnails"));
        assert!(!config.should_skip_hidden("vacation"));

        config.include_hidden = true;
        assert!(!config.should_skip_hidden(".thumbnails"));
    }
}
